//! Run gates: whether a run continues once references are known, and
//! whether the current ref is allowed to touch the board.

use crate::config::{ActionBranch, RunConfig};
use crate::references::IssueRef;

pub const MISSING_ISSUE_MESSAGE: &str = "requireissue is set to true, and no issues were found. \
     Please edit the pull request message to contain a fix reference.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    /// Stop the run as failed.
    Fail(String),
    /// Stop the run as skipped.
    Neutral(String),
}

pub struct IssueGate {
    pub requires_issue: bool,
}

impl IssueGate {
    pub fn new(requires_issue: bool) -> Self {
        Self { requires_issue }
    }

    pub fn evaluate(&self, refs: &[IssueRef], pr_number: u64) -> GateDecision {
        if !refs.is_empty() {
            return GateDecision::Proceed;
        }
        if self.requires_issue {
            GateDecision::Fail(MISSING_ISSUE_MESSAGE.to_string())
        } else {
            GateDecision::Neutral(format!(
                "no linked issues found for the pull request: {}",
                pr_number
            ))
        }
    }
}

pub struct BranchFilter {
    pub action_branch: ActionBranch,
    pub ignore_branches: Vec<String>,
}

impl BranchFilter {
    pub fn new(action_branch: ActionBranch, ignore_branches: Vec<String>) -> Self {
        Self {
            action_branch,
            ignore_branches,
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.action_branch.clone(), config.ignore_branches.clone())
    }

    /// The ignore suffix `git_ref` ends with, if any.
    pub fn ignored_by(&self, git_ref: &str) -> Option<&str> {
        self.ignore_branches
            .iter()
            .map(String::as_str)
            .find(|suffix| git_ref.ends_with(*suffix))
    }

    pub fn should_move(&self, git_ref: &str) -> bool {
        self.action_branch.matches(git_ref) && self.ignored_by(git_ref).is_none()
    }
}
