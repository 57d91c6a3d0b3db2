//! Types flowing between the text collector and the reference parser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a block of scanned text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    PullRequestBody,
    ReviewComment,
    CommitMessage,
    /// Text handed to the `scan` command.
    Input,
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TextSource::PullRequestBody => "pull request body",
            TextSource::ReviewComment => "review comment",
            TextSource::CommitMessage => "commit message",
            TextSource::Input => "input",
        };
        f.write_str(label)
    }
}

/// A block of pull request text to scan for issue references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub source: TextSource,
    pub text: String,
}

impl TextBlock {
    pub fn new(source: TextSource, text: impl Into<String>) -> Self {
        Self {
            source,
            text: text.into(),
        }
    }
}

/// An issue number referenced by a closing keyword.
///
/// Kept in its textual form: the digits are only ever spliced back into API
/// paths, so there is no reason to bound them by an integer width.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueRef(String);

impl IssueRef {
    /// Build a reference from captured digits. Returns `None` for anything
    /// that is empty or not purely ASCII digits.
    pub fn new(digits: impl Into<String>) -> Option<Self> {
        let digits = digits.into();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
