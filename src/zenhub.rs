use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ZENHUB_API_URL: &str = "https://api.zenhub.com";

/// A pipeline (board column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
}

/// A repository's board (subset of fields).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub pipelines: Vec<Pipeline>,
}

impl Board {
    /// Exact, case-sensitive lookup by display name.
    pub fn find_pipeline(&self, name: &str) -> Option<&Pipeline> {
        self.pipelines.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelinePosition {
    Top,
    Bottom,
}

/// Body of a move request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineMove {
    pub pipeline_id: String,
    pub position: PipelinePosition,
}

impl PipelineMove {
    pub fn to_top(pipeline_id: impl Into<String>) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            position: PipelinePosition::Top,
        }
    }
}

/// The board calls a run needs.
/// Real implementation: `ZenHubClient`. Test double: `fakes::MemoryBoard`.
#[async_trait]
pub trait BoardService: Send + Sync {
    /// `Ok(None)` when the repository has no board; `Err` when the board
    /// could not be retrieved.
    async fn get_board(&self, repo_id: u64) -> anyhow::Result<Option<Board>>;

    /// Succeeds or fails as a whole; the service returns no payload worth
    /// inspecting.
    async fn change_pipeline(
        &self,
        repo_id: u64,
        issue_number: &str,
        body: &PipelineMove,
    ) -> anyhow::Result<()>;
}

/// An authenticated session with the ZenHub REST API.
pub struct ZenHubClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ZenHubClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn repo_url(&self, repo_id: u64, path: &str) -> String {
        format!("{}/p1/repositories/{}/{}", self.api_url, repo_id, path)
    }
}

#[async_trait]
impl BoardService for ZenHubClient {
    async fn get_board(&self, repo_id: u64) -> anyhow::Result<Option<Board>> {
        let resp = self
            .http
            .get(self.repo_url(repo_id, "board"))
            .header("X-Authentication-Token", &self.api_key)
            .send()
            .await
            .context("Failed to send board request to ZenHub")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let board = resp
            .error_for_status()
            .context("ZenHub board API returned error status")?
            .json::<Board>()
            .await
            .context("Failed to parse board response from ZenHub")?;
        Ok(Some(board))
    }

    async fn change_pipeline(
        &self,
        repo_id: u64,
        issue_number: &str,
        body: &PipelineMove,
    ) -> anyhow::Result<()> {
        self.http
            .post(self.repo_url(repo_id, &format!("issues/{}/moves", issue_number)))
            .header("X-Authentication-Token", &self.api_key)
            .json(body)
            .send()
            .await
            .context("Failed to send move request to ZenHub")?
            .error_for_status()
            .context("ZenHub move API returned error status")?;
        Ok(())
    }
}
