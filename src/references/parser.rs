//! Closing-keyword parsing.
//!
//! A reference is a closing keyword (`close`, `fix`, `resolve` and their
//! inflections, any case) followed by whitespace, `#`, and digits. The
//! keyword has to start the text or a line, or follow a space, tab, comma,
//! period, semicolon, or quote, so `prefixes #9` and `re-closes #9` are not
//! references.

use super::types::{IssueRef, TextBlock};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Group 1 is the keyword, group 2 the issue number without `#`.
static ISSUE_KEYWORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r##"(?im)(?:^|[ \t,.;"'`])(close|closes|closed|fixed|fix|fixes|resolve|resolves|resolved)\s+#([0-9]+)"##,
    )
    .unwrap()
});

/// Every issue number referenced in `text`, in order, duplicates included.
pub fn scan_text(text: &str) -> Vec<IssueRef> {
    ISSUE_KEYWORD_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(2))
        .filter_map(|digits| IssueRef::new(digits.as_str()))
        .collect()
}

/// Scan every block and return the unique issue references in the order
/// they were first seen.
pub fn extract_issue_refs(blocks: &[TextBlock]) -> Vec<IssueRef> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for block in blocks {
        for issue in scan_text(&block.text) {
            if seen.insert(issue.clone()) {
                tracing::debug!(issue = %issue, source = %block.source, "found issue reference");
                unique.push(issue);
            }
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::references::TextSource;

    fn numbers(refs: &[IssueRef]) -> Vec<&str> {
        refs.iter().map(IssueRef::as_str).collect()
    }

    fn block(text: &str) -> TextBlock {
        TextBlock::new(TextSource::PullRequestBody, text)
    }

    #[test]
    fn test_scan_simple_fix() {
        assert_eq!(numbers(&scan_text("fix #12")), vec!["12"]);
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        assert_eq!(numbers(&scan_text("FIXES #1, Closes #2, ReSoLvEd #3")), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_scan_every_keyword() {
        let text = "close #1 closes #2 closed #3 fix #4 fixes #5 fixed #6 \
                    resolve #7 resolves #8 resolved #9";
        assert_eq!(
            numbers(&scan_text(text)),
            vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]
        );
    }

    #[test]
    fn test_scan_allows_long_whitespace_between_keyword_and_number() {
        assert_eq!(numbers(&scan_text("Fixes  #34")), vec!["34"]);
        assert_eq!(numbers(&scan_text("Fixes\n\t  #35")), vec!["35"]);
    }

    #[test]
    fn test_scan_requires_whitespace_before_hash() {
        assert!(scan_text("resolved#56").is_empty());
    }

    #[test]
    fn test_scan_requires_digits_right_after_hash() {
        assert!(scan_text("fixes # 12").is_empty());
        assert!(scan_text("fixes #abc").is_empty());
    }

    #[test]
    fn test_scan_rejects_keyword_inside_word() {
        assert!(scan_text("prefixes #9").is_empty());
        assert!(scan_text("unfixed #9").is_empty());
    }

    #[test]
    fn test_scan_rejects_hyphen_before_keyword() {
        assert!(scan_text("re-closes #9").is_empty());
    }

    #[test]
    fn test_scan_accepts_each_delimiter() {
        for text in [
            "x fix #1",
            "x\tfix #1",
            "x,fix #1",
            "x.fix #1",
            "x;fix #1",
            "\"fix #1\"",
            "'fix #1'",
            "`fix #1`",
        ] {
            assert_eq!(numbers(&scan_text(text)), vec!["1"], "input: {:?}", text);
        }
    }

    #[test]
    fn test_scan_matches_at_line_start() {
        let text = "Summary of the change\nCloses #77\nresolves #78";
        assert_eq!(numbers(&scan_text(text)), vec!["77", "78"]);
    }

    #[test]
    fn test_scan_keeps_duplicates() {
        assert_eq!(numbers(&scan_text("fix #1 and fix #1")), vec!["1", "1"]);
    }

    #[test]
    fn test_scan_stops_at_non_digit() {
        assert_eq!(numbers(&scan_text("fixes #12abc")), vec!["12"]);
    }

    #[test]
    fn test_scan_ignores_non_ascii_digits() {
        assert!(scan_text("fixes #١٢").is_empty());
    }

    #[test]
    fn test_scan_no_references() {
        assert!(scan_text("Refactor the widget factory. See #12 for context.").is_empty());
    }

    #[test]
    fn test_extract_deduplicates_in_first_encounter_order() {
        let blocks = vec![block("fixes #12"), block("closes #12"), block("resolves #34")];
        assert_eq!(numbers(&extract_issue_refs(&blocks)), vec!["12", "34"]);
    }

    #[test]
    fn test_extract_keeps_order_across_sources() {
        let blocks = vec![
            TextBlock::new(TextSource::PullRequestBody, "Fixes #101"),
            TextBlock::new(TextSource::ReviewComment, "closes #102, also fixes #101"),
            TextBlock::new(TextSource::CommitMessage, "wip"),
            TextBlock::new(TextSource::CommitMessage, "resolved #7"),
        ];
        assert_eq!(numbers(&extract_issue_refs(&blocks)), vec!["101", "102", "7"]);
    }

    #[test]
    fn test_extract_empty_input() {
        assert!(extract_issue_refs(&[]).is_empty());
        assert!(extract_issue_refs(&[block("")]).is_empty());
    }
}
