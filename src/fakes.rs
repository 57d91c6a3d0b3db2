//! In-memory fakes for the collaborator traits (testing only)
//!
//! `MemorySourceControl` serves a fixed pull request, its comments, commits
//! and issue states. `MemoryBoard` serves a fixed board and records every
//! call so tests can assert on what reached the board service.

use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::github::{
    CommitDetail, Issue, IssueState, PullCommit, PullRequest, ReviewComment, SourceControl,
};
use crate::zenhub::{Board, BoardService, Pipeline, PipelineMove};

// ---------------------------------------------------------------------------
// MemorySourceControl
// ---------------------------------------------------------------------------

/// Which source-control call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScmFailure {
    PullRequest,
    ReviewComments,
    Commits,
    Issue,
}

#[derive(Debug, Default)]
pub struct MemorySourceControl {
    body: Option<String>,
    comments: Vec<String>,
    commits: Vec<String>,
    closed: HashSet<String>,
    failure: Option<ScmFailure>,
    issue_lookups: Mutex<Vec<String>>,
}

impl MemorySourceControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_comment(mut self, body: impl Into<String>) -> Self {
        self.comments.push(body.into());
        self
    }

    pub fn with_commit(mut self, message: impl Into<String>) -> Self {
        self.commits.push(message.into());
        self
    }

    pub fn with_closed_issue(mut self, number: impl Into<String>) -> Self {
        self.closed.insert(number.into());
        self
    }

    pub fn failing(mut self, failure: ScmFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Issue numbers looked up so far, in call order.
    pub fn issue_lookups(&self) -> Vec<String> {
        self.issue_lookups.lock().unwrap().clone()
    }

    fn check(&self, call: ScmFailure) -> anyhow::Result<()> {
        if self.failure == Some(call) {
            return Err(anyhow!("injected {:?} failure", call));
        }
        Ok(())
    }
}

#[async_trait]
impl SourceControl for MemorySourceControl {
    async fn get_pull_request(&self, number: u64) -> anyhow::Result<PullRequest> {
        self.check(ScmFailure::PullRequest)?;
        Ok(PullRequest {
            number,
            body: self.body.clone(),
        })
    }

    async fn list_review_comments(&self, _number: u64) -> anyhow::Result<Vec<ReviewComment>> {
        self.check(ScmFailure::ReviewComments)?;
        Ok(self
            .comments
            .iter()
            .map(|body| ReviewComment { body: body.clone() })
            .collect())
    }

    async fn list_commits(&self, _number: u64) -> anyhow::Result<Vec<PullCommit>> {
        self.check(ScmFailure::Commits)?;
        Ok(self
            .commits
            .iter()
            .map(|message| PullCommit {
                commit: CommitDetail {
                    message: message.clone(),
                },
            })
            .collect())
    }

    async fn get_issue(&self, number: &str) -> anyhow::Result<Issue> {
        self.issue_lookups.lock().unwrap().push(number.to_string());
        self.check(ScmFailure::Issue)?;
        let state = if self.closed.contains(number) {
            IssueState::Closed
        } else {
            IssueState::Open
        };
        Ok(Issue {
            number: number.parse()?,
            state,
        })
    }
}

// ---------------------------------------------------------------------------
// MemoryBoard
// ---------------------------------------------------------------------------

/// A move the board service received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMove {
    pub repo_id: u64,
    pub issue_number: String,
    pub body: PipelineMove,
}

#[derive(Debug, Default)]
pub struct MemoryBoard {
    board: Option<Board>,
    fail_board: bool,
    failing_moves: HashSet<String>,
    board_requests: Mutex<Vec<u64>>,
    moves: Mutex<Vec<RecordedMove>>,
}

impl MemoryBoard {
    /// A board with the given pipeline names; ids are `pipeline-<index>`.
    pub fn with_pipelines(names: &[&str]) -> Self {
        let pipelines = names
            .iter()
            .enumerate()
            .map(|(i, name)| Pipeline {
                id: format!("pipeline-{}", i),
                name: name.to_string(),
            })
            .collect();
        Self {
            board: Some(Board { pipelines }),
            ..Default::default()
        }
    }

    /// A repository with no board.
    pub fn without_board() -> Self {
        Self::default()
    }

    /// Board retrieval fails outright.
    pub fn unreachable() -> Self {
        Self {
            fail_board: true,
            ..Default::default()
        }
    }

    pub fn failing_move(mut self, issue_number: impl Into<String>) -> Self {
        self.failing_moves.insert(issue_number.into());
        self
    }

    pub fn board_requests(&self) -> Vec<u64> {
        self.board_requests.lock().unwrap().clone()
    }

    /// Every move received, including the ones that were answered with an error.
    pub fn moves(&self) -> Vec<RecordedMove> {
        self.moves.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.board_requests().len() + self.moves().len()
    }
}

#[async_trait]
impl BoardService for MemoryBoard {
    async fn get_board(&self, repo_id: u64) -> anyhow::Result<Option<Board>> {
        self.board_requests.lock().unwrap().push(repo_id);
        if self.fail_board {
            return Err(anyhow!("injected board failure"));
        }
        Ok(self.board.clone())
    }

    async fn change_pipeline(
        &self,
        repo_id: u64,
        issue_number: &str,
        body: &PipelineMove,
    ) -> anyhow::Result<()> {
        self.moves.lock().unwrap().push(RecordedMove {
            repo_id,
            issue_number: issue_number.to_string(),
            body: body.clone(),
        });
        if self.failing_moves.contains(issue_number) {
            return Err(anyhow!("injected move failure for #{}", issue_number));
        }
        Ok(())
    }
}
