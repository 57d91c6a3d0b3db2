//! Single-pass run over one pull request event.
//!
//! Stages run strictly in order and are never revisited:
//! collect text → extract references → issue gate → branch filter →
//! board mover → report. The issue gate and any fatal error end the run
//! immediately.

use crate::collector::collect_text_blocks;
use crate::config::RunConfig;
use crate::context::ExecutionContext;
use crate::errors::RunError;
use crate::gates::{BranchFilter, GateDecision, IssueGate};
use crate::github::SourceControl;
use crate::mover::{BoardMover, MoveTally};
use crate::outcome::RunOutcome;
use crate::references::extract_issue_refs;
use crate::zenhub::BoardService;

pub struct Runner<'a> {
    config: &'a RunConfig,
    ctx: &'a ExecutionContext,
    scm: &'a dyn SourceControl,
    board: &'a dyn BoardService,
}

impl<'a> Runner<'a> {
    pub fn new(
        config: &'a RunConfig,
        ctx: &'a ExecutionContext,
        scm: &'a dyn SourceControl,
        board: &'a dyn BoardService,
    ) -> Self {
        Self {
            config,
            ctx,
            scm,
            board,
        }
    }

    pub async fn run(&self) -> Result<RunOutcome, RunError> {
        tracing::info!(
            repository = %self.ctx.slug(),
            git_ref = %self.ctx.git_ref,
            event = %self.ctx.event_name,
            pull_request = self.ctx.pr_number,
            repository_id = self.ctx.repository_id,
            "resolved context"
        );
        tracing::debug!(payload = %self.ctx.payload, "event payload");

        let blocks = collect_text_blocks(self.scm, self.ctx.pr_number).await?;
        let refs = extract_issue_refs(&blocks);
        let listed: Vec<String> = refs.iter().map(ToString::to_string).collect();
        tracing::info!("found linked issues: [{}]", listed.join(", "));

        match IssueGate::new(self.config.requires_issue).evaluate(&refs, self.ctx.pr_number) {
            GateDecision::Proceed => {}
            GateDecision::Fail(message) => return Ok(RunOutcome::Failure(message)),
            GateDecision::Neutral(message) => return Ok(RunOutcome::Neutral(message)),
        }

        let filter = BranchFilter::from_config(self.config);
        let tally = if filter.should_move(&self.ctx.git_ref) {
            tracing::info!(
                "ref {} matches action branch '{}' - moving issues",
                self.ctx.git_ref,
                self.config.action_branch
            );
            BoardMover::new(
                self.scm,
                self.board,
                self.ctx.repository_id,
                self.ctx.slug(),
                &self.config.pipeline_name,
            )
            .move_all(&refs)
            .await?
        } else {
            match filter.ignored_by(&self.ctx.git_ref) {
                Some(suffix) => tracing::info!(
                    "ref {} matches ignored branch '{}' - not moving issues",
                    self.ctx.git_ref,
                    suffix
                ),
                None => tracing::info!(
                    "ref {} does not match action branch '{}' - not moving issues",
                    self.ctx.git_ref,
                    self.config.action_branch
                ),
            }
            MoveTally::default()
        };

        Ok(RunOutcome::moved(tally, &self.config.pipeline_name))
    }
}
