//! Moving referenced issues to the configured pipeline.
//!
//! Issues are processed one at a time, in reference order. Closed issues,
//! repositories without a board and boards without the named pipeline are
//! skipped without counting an attempt. A failed move is logged and
//! counted as an attempt only. Source-control lookups and board retrieval
//! failures abort the run.

use crate::errors::RunError;
use crate::github::{IssueState, SourceControl};
use crate::references::IssueRef;
use crate::zenhub::{BoardService, PipelineMove};

/// Outcome for a single issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    pub attempted: bool,
    pub succeeded: bool,
}

impl MoveResult {
    pub const SKIPPED: MoveResult = MoveResult {
        attempted: false,
        succeeded: false,
    };

    pub fn attempt(succeeded: bool) -> Self {
        Self {
            attempted: true,
            succeeded,
        }
    }
}

/// Running totals across a run. `moved` only ever counts confirmed moves,
/// so it never exceeds `attempted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveTally {
    pub attempted: u32,
    pub moved: u32,
}

impl MoveTally {
    pub fn record(&mut self, result: MoveResult) {
        if result.attempted {
            self.attempted += 1;
            if result.succeeded {
                self.moved += 1;
            }
        }
    }
}

pub struct BoardMover<'a> {
    scm: &'a dyn SourceControl,
    board: &'a dyn BoardService,
    repo_id: u64,
    repo_slug: String,
    pipeline_name: &'a str,
}

impl<'a> BoardMover<'a> {
    pub fn new(
        scm: &'a dyn SourceControl,
        board: &'a dyn BoardService,
        repo_id: u64,
        repo_slug: impl Into<String>,
        pipeline_name: &'a str,
    ) -> Self {
        Self {
            scm,
            board,
            repo_id,
            repo_slug: repo_slug.into(),
            pipeline_name,
        }
    }

    pub async fn move_all(&self, refs: &[IssueRef]) -> Result<MoveTally, RunError> {
        let mut tally = MoveTally::default();
        for issue in refs {
            let result = self.move_issue(issue).await?;
            tally.record(result);
        }
        Ok(tally)
    }

    pub async fn move_issue(&self, issue: &IssueRef) -> Result<MoveResult, RunError> {
        let current = self
            .scm
            .get_issue(issue.as_str())
            .await
            .map_err(|source| RunError::IssueLookup {
                issue: issue.as_str().to_string(),
                source,
            })?;

        if current.state == IssueState::Closed {
            tracing::info!("issue {} is already closed, skipping", issue);
            return Ok(MoveResult::SKIPPED);
        }

        let board = self
            .board
            .get_board(self.repo_id)
            .await
            .map_err(|source| RunError::BoardRetrieval {
                repo_id: self.repo_id,
                source,
            })?;

        let Some(board) = board else {
            tracing::warn!(
                "unable to locate a zenhub board for repo: '{}' ({})",
                self.repo_slug,
                self.repo_id
            );
            return Ok(MoveResult::SKIPPED);
        };

        let Some(pipeline) = board.find_pipeline(self.pipeline_name) else {
            tracing::warn!(
                "unable to locate a zenhub pipeline named '{}'",
                self.pipeline_name
            );
            return Ok(MoveResult::SKIPPED);
        };

        let body = PipelineMove::to_top(pipeline.id.clone());
        match self
            .board
            .change_pipeline(self.repo_id, issue.as_str(), &body)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    "setting issue {} column to {} success",
                    issue,
                    self.pipeline_name
                );
                Ok(MoveResult::attempt(true))
            }
            Err(e) => {
                tracing::error!(
                    "setting issue {} column to {} failed: {:#}",
                    issue,
                    self.pipeline_name,
                    e
                );
                Ok(MoveResult::attempt(false))
            }
        }
    }
}
