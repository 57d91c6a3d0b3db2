//! Terminal outcomes of a run and how they are reported.

use std::fmt;

use crate::mover::MoveTally;

/// Exit status the host platform reads as "skipped, not failed".
pub const NEUTRAL_EXIT_CODE: i32 = 78;

/// Exactly one of these ends every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Success(String),
    Failure(String),
    Neutral(String),
}

impl RunOutcome {
    /// The final message after the board mover stage.
    pub fn moved(tally: MoveTally, pipeline_name: &str) -> Self {
        RunOutcome::Success(format!(
            "successfully moved {}/{} issues to {}",
            tally.moved, tally.attempted, pipeline_name
        ))
    }

    pub fn message(&self) -> &str {
        match self {
            RunOutcome::Success(m) | RunOutcome::Failure(m) | RunOutcome::Neutral(m) => m,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Success(_) => 0,
            RunOutcome::Failure(_) => 1,
            RunOutcome::Neutral(_) => NEUTRAL_EXIT_CODE,
        }
    }

    /// Log the outcome and print it to stdout. Failures are also emitted as
    /// an `::error::` workflow command so the run is annotated.
    pub fn report(&self) {
        match self {
            RunOutcome::Success(m) => {
                tracing::info!(outcome = "success", "{}", m);
                println!("{} {}", console::style("✔").green(), m);
            }
            RunOutcome::Neutral(m) => {
                tracing::info!(outcome = "neutral", "{}", m);
                println!("{} {}", console::style("–").dim(), m);
            }
            RunOutcome::Failure(m) => {
                tracing::error!(outcome = "failure", "{}", m);
                println!("::error::{}", escape_workflow_data(m));
                println!("{} {}", console::style("✖").red(), m);
            }
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunOutcome::Success(_) => "success",
            RunOutcome::Failure(_) => "failure",
            RunOutcome::Neutral(_) => "neutral",
        };
        write!(f, "{}: {}", label, self.message())
    }
}

/// Workflow command data must not contain raw `%`, CR or LF.
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
