//! The CI step itself — `zenhub-mover run`.

use std::process::ExitCode;

use zenhub_mover::config::RunConfig;
use zenhub_mover::context::{ContextInputs, ExecutionContext};
use zenhub_mover::github::GitHubClient;
use zenhub_mover::outcome::RunOutcome;
use zenhub_mover::runner::Runner;
use zenhub_mover::zenhub::ZenHubClient;

use super::super::RunArgs;

pub async fn cmd_run(args: &RunArgs) -> ExitCode {
    let outcome = execute(args).await;
    outcome.report();
    // Exit codes are 0, 1 and 78.
    ExitCode::from(outcome.exit_code() as u8)
}

async fn execute(args: &RunArgs) -> RunOutcome {
    let config = RunConfig::from_inputs(
        args.zh_api_key.clone(),
        args.zh_pipeline_name.clone(),
        &args.zh_action_branch,
        args.zh_ignore_branches.as_deref(),
        &args.require_issue,
    );
    tracing::debug!(?config, "run configuration");

    let ctx = match ExecutionContext::resolve(ContextInputs {
        repository: args.repository.clone(),
        git_ref: args.git_ref.clone(),
        event_name: args.event_name.clone(),
        event_path: args.event_path.clone(),
        pr_number: args.pr_number,
        repository_id: args.repository_id,
    }) {
        Ok(ctx) => ctx,
        Err(e) => return RunOutcome::Failure(e.to_string()),
    };

    let github = GitHubClient::new(
        args.github_api_url.clone(),
        args.github_token.clone(),
        ctx.owner.clone(),
        ctx.repo.clone(),
    );
    // One board session for the whole run.
    let zenhub = ZenHubClient::new(args.zenhub_api_url.clone(), config.api_key.clone());

    match Runner::new(&config, &ctx, &github, &zenhub).run().await {
        Ok(outcome) => outcome,
        Err(e) => RunOutcome::Failure(e.to_string()),
    }
}
