//! Typed error hierarchy for a mover run.
//!
//! Two top-level enums cover the two places a run can abort:
//! - `ContextError` — the triggering event could not be resolved
//! - `RunError` — a source-control or board call that the run depends on failed
//!
//! Per-issue problems (a failed move, a missing pipeline, a repository with
//! no board) are not errors: they are logged and the run continues.

use std::path::PathBuf;

use thiserror::Error;

/// Errors while resolving the execution context from the host environment.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Invalid repository slug '{0}': expected 'owner/repo'")]
    InvalidRepository(String),

    #[error("Failed to read event payload at {path}: {source}")]
    PayloadRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse event payload at {path}: {source}")]
    PayloadParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No pull request number found in the event payload; pass --pr-number")]
    MissingPullRequest,

    #[error("No repository id found in the event payload")]
    MissingRepositoryId,
}

/// Fatal failures while processing a pull request.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to fetch pull request #{number}: {source:#}")]
    PullRequestFetch {
        number: u64,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to list review comments for pull request #{number}: {source:#}")]
    ReviewCommentsFetch {
        number: u64,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to list commits for pull request #{number}: {source:#}")]
    CommitsFetch {
        number: u64,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to look up issue #{issue}: {source:#}")]
    IssueLookup {
        issue: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Unable to retrieve zenhub board for repo {repo_id}: {source:#}")]
    BoardRetrieval {
        repo_id: u64,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Context(#[from] ContextError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_error_invalid_repository_carries_slug() {
        let err = ContextError::InvalidRepository("no-slash".to_string());
        assert!(err.to_string().contains("no-slash"));
    }

    #[test]
    fn context_error_payload_read_carries_path() {
        let path = PathBuf::from("/github/workflow/event.json");
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ContextError::PayloadRead {
            path: path.clone(),
            source: io_err,
        };
        match &err {
            ContextError::PayloadRead { path: p, source: s } => {
                assert_eq!(p, &path);
                assert_eq!(s.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected PayloadRead"),
        }
    }

    #[test]
    fn run_error_includes_source_chain() {
        let source = anyhow::anyhow!("connection refused").context("GET /pulls/7");
        let err = RunError::PullRequestFetch { number: 7, source };
        let message = err.to_string();
        assert!(message.contains("#7"));
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn run_error_board_retrieval_carries_repo_id() {
        let err = RunError::BoardRetrieval {
            repo_id: 4242,
            source: anyhow::anyhow!("401 Unauthorized"),
        };
        match &err {
            RunError::BoardRetrieval { repo_id, .. } => assert_eq!(*repo_id, 4242),
            _ => panic!("Expected BoardRetrieval"),
        }
        assert!(err.to_string().starts_with("Unable to retrieve zenhub board"));
    }

    #[test]
    fn run_error_converts_from_context_error() {
        let err: RunError = ContextError::MissingRepositoryId.into();
        assert!(matches!(
            err,
            RunError::Context(ContextError::MissingRepositoryId)
        ));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&ContextError::MissingPullRequest);
        assert_std_error(&RunError::IssueLookup {
            issue: "1".into(),
            source: anyhow::anyhow!("x"),
        });
    }
}
