//! Execution context of the triggering event.
//!
//! The host platform describes the event through environment variables
//! (`GITHUB_REPOSITORY`, `GITHUB_REF`, `GITHUB_EVENT_NAME`) and a JSON
//! payload file at `GITHUB_EVENT_PATH`. The payload supplies the pull
//! request number and the numeric repository id the board is keyed by.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::ContextError;

/// Raw context inputs as handed over by the CLI.
#[derive(Debug, Clone, Default)]
pub struct ContextInputs {
    pub repository: String,
    pub git_ref: String,
    pub event_name: String,
    pub event_path: Option<PathBuf>,
    pub pr_number: Option<u64>,
    pub repository_id: Option<u64>,
}

/// Read-only snapshot of the event that triggered the run.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
    pub git_ref: String,
    pub event_name: String,
    pub repository_id: u64,
    pub payload: Value,
}

impl ExecutionContext {
    /// Resolve the context, reading the payload file if one is given.
    ///
    /// Explicit `pr_number` / `repository_id` inputs win over the payload.
    pub fn resolve(inputs: ContextInputs) -> Result<Self, ContextError> {
        let (owner, repo) = parse_repository_slug(&inputs.repository)?;
        let payload = match inputs.event_path.as_deref() {
            Some(path) => read_payload(path)?,
            None => Value::Null,
        };

        let pr_number = inputs
            .pr_number
            .or_else(|| pull_request_number(&payload))
            .ok_or(ContextError::MissingPullRequest)?;
        let repository_id = inputs
            .repository_id
            .or_else(|| repository_id(&payload))
            .ok_or(ContextError::MissingRepositoryId)?;

        Ok(Self {
            owner,
            repo,
            pr_number,
            git_ref: inputs.git_ref,
            event_name: inputs.event_name,
            repository_id,
            payload,
        })
    }

    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Split an `owner/repo` slug. Both segments must be non-empty and there
/// must be exactly two of them.
pub fn parse_repository_slug(slug: &str) -> Result<(String, String), ContextError> {
    let parts: Vec<&str> = slug.trim().split('/').collect();
    match parts.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ContextError::InvalidRepository(slug.to_string())),
    }
}

fn read_payload(path: &Path) -> Result<Value, ContextError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ContextError::PayloadRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ContextError::PayloadParse {
        path: path.to_path_buf(),
        source,
    })
}

/// `pull_request.number`, falling back to the top-level `number` that
/// issue-style payloads carry.
fn pull_request_number(payload: &Value) -> Option<u64> {
    payload
        .pointer("/pull_request/number")
        .and_then(Value::as_u64)
        .or_else(|| payload.get("number").and_then(Value::as_u64))
}

fn repository_id(payload: &Value) -> Option<u64> {
    payload.pointer("/repository/id").and_then(Value::as_u64)
}
