//! Issue reference extraction.
//!
//! Pull request text declares the issues it closes with GitHub's closing
//! keywords:
//!
//! - `Fixes #12`
//! - `closes #34`
//! - `Resolved\n#56`
//!
//! The parser collects every referenced issue number across a sequence of
//! text blocks and collapses duplicates, keeping first-encounter order.

mod parser;
mod types;

pub use parser::{extract_issue_refs, scan_text};
pub use types::{IssueRef, TextBlock, TextSource};
