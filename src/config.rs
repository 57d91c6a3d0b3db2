use std::fmt;

/// The literal action-branch value that disables the branch restriction.
pub const ANY_BRANCH: &str = "any";

/// Which refs are allowed to move issues on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionBranch {
    /// Every ref qualifies.
    Any,
    /// Only refs ending with this suffix qualify.
    Suffix(String),
}

impl ActionBranch {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == ANY_BRANCH {
            ActionBranch::Any
        } else {
            ActionBranch::Suffix(raw.to_string())
        }
    }

    pub fn matches(&self, git_ref: &str) -> bool {
        match self {
            ActionBranch::Any => true,
            ActionBranch::Suffix(suffix) => git_ref.ends_with(suffix.as_str()),
        }
    }
}

impl fmt::Display for ActionBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionBranch::Any => f.write_str(ANY_BRANCH),
            ActionBranch::Suffix(suffix) => f.write_str(suffix),
        }
    }
}

/// Split a comma-separated ignore list into branch suffixes.
///
/// Segments are trimmed and empty segments dropped: an empty suffix would
/// match every ref and silently disable the mover.
pub fn parse_ignore_branches(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Only the exact string `"true"` turns the flag on.
pub fn parse_require_issue(raw: &str) -> bool {
    raw == "true"
}

/// Immutable inputs for a single run.
#[derive(Clone)]
pub struct RunConfig {
    pub api_key: String,
    pub pipeline_name: String,
    pub action_branch: ActionBranch,
    pub ignore_branches: Vec<String>,
    pub requires_issue: bool,
}

impl RunConfig {
    /// Build a config from the raw string inputs the host platform passes.
    pub fn from_inputs(
        api_key: impl Into<String>,
        pipeline_name: impl Into<String>,
        action_branch: &str,
        ignore_branches: Option<&str>,
        require_issue: &str,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            pipeline_name: pipeline_name.into(),
            action_branch: ActionBranch::parse(action_branch),
            ignore_branches: parse_ignore_branches(ignore_branches),
            requires_issue: parse_require_issue(require_issue),
        }
    }
}

// The API key never reaches logs.
impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("api_key", &"<redacted>")
            .field("pipeline_name", &self.pipeline_name)
            .field("action_branch", &self.action_branch)
            .field("ignore_branches", &self.ignore_branches)
            .field("requires_issue", &self.requires_issue)
            .finish()
    }
}
