use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use zenhub_mover::github::DEFAULT_GITHUB_API_URL;
use zenhub_mover::telemetry;
use zenhub_mover::zenhub::DEFAULT_ZENHUB_API_URL;

mod cmd;

#[derive(Parser)]
#[command(name = "zenhub-mover")]
#[command(
    version,
    about = "Move issues closed by a pull request to a ZenHub pipeline"
)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as newline-delimited JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the triggering pull request and move the issues it references
    Run(RunArgs),
    /// Print the issue references found in files (or stdin), one per line
    Scan {
        /// Files to scan; reads stdin when none are given
        files: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// ZenHub API key
    #[arg(long, env = "INPUT_ZHAPIKEY", hide_env_values = true)]
    pub zh_api_key: String,

    /// Display name of the pipeline to move issues to
    #[arg(long, env = "INPUT_ZHPIPELINENAME")]
    pub zh_pipeline_name: String,

    /// Branch suffix whose events move issues, or "any"
    #[arg(long, env = "INPUT_ZHACTIONBRANCH")]
    pub zh_action_branch: String,

    /// Comma-separated branch suffixes that never move issues
    #[arg(long, env = "INPUT_ZHIGNOREBRANCHES")]
    pub zh_ignore_branches: Option<String>,

    /// Fail the run when no issue reference is found ("true" to enable)
    #[arg(long, env = "INPUT_REQUIREISSUE", default_value = "false")]
    pub require_issue: String,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    pub github_api_url: String,

    #[arg(long, env = "ZENHUB_API_URL", default_value = DEFAULT_ZENHUB_API_URL)]
    pub zenhub_api_url: String,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    #[arg(long = "ref", env = "GITHUB_REF", default_value = "")]
    pub git_ref: String,

    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
    pub event_name: String,

    /// Path to the JSON event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Pull request number (overrides the payload)
    #[arg(long)]
    pub pr_number: Option<u64>,

    /// Numeric repository id (overrides the payload)
    #[arg(long)]
    pub repository_id: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    telemetry::init_tracing(cli.log_json, telemetry::level_for(cli.verbose));

    match &cli.command {
        Commands::Run(args) => Ok(cmd::cmd_run(args).await),
        Commands::Scan { files } => {
            cmd::cmd_scan(files)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
