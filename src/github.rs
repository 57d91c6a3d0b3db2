use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "zenhub-mover";
const PER_PAGE: usize = 100;

/// A pull request (subset of fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub body: Option<String>,
}

/// A review comment on a pull request diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewComment {
    #[serde(default)]
    pub body: String,
}

/// A commit listed on a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullCommit {
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// An issue (subset of fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub state: IssueState,
}

/// The source-control calls a run needs, scoped to one repository.
/// Real implementation: `GitHubClient`. Test double: `fakes::MemorySourceControl`.
#[async_trait]
pub trait SourceControl: Send + Sync {
    async fn get_pull_request(&self, number: u64) -> anyhow::Result<PullRequest>;

    async fn list_review_comments(&self, number: u64) -> anyhow::Result<Vec<ReviewComment>>;

    async fn list_commits(&self, number: u64) -> anyhow::Result<Vec<PullCommit>>;

    async fn get_issue(&self, number: &str) -> anyhow::Result<Issue>;
}

/// GitHub REST client bound to a single repository.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
    owner: String,
    repo: String,
}

impl GitHubClient {
    pub fn new(
        api_url: impl Into<String>,
        token: Option<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    fn repo_url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_url, self.owner, self.repo, path)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT);
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Fetch every page of a list endpoint, stopping at the first short page.
    async fn get_all_pages<T>(&self, url: &str, what: &str) -> anyhow::Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            let items: Vec<T> = self
                .get(url)
                .query(&[
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .await
                .with_context(|| format!("Failed to send {} request to GitHub", what))?
                .error_for_status()
                .with_context(|| format!("GitHub {} API returned error status", what))?
                .json()
                .await
                .with_context(|| format!("Failed to parse {} response from GitHub", what))?;

            let count = items.len();
            all.extend(items);

            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(all)
    }
}

#[async_trait]
impl SourceControl for GitHubClient {
    async fn get_pull_request(&self, number: u64) -> anyhow::Result<PullRequest> {
        self.get(&self.repo_url(&format!("pulls/{}", number)))
            .send()
            .await
            .context("Failed to send pull request request to GitHub")?
            .error_for_status()
            .context("GitHub pull request API returned error status")?
            .json::<PullRequest>()
            .await
            .context("Failed to parse pull request response from GitHub")
    }

    async fn list_review_comments(&self, number: u64) -> anyhow::Result<Vec<ReviewComment>> {
        let url = self.repo_url(&format!("pulls/{}/comments", number));
        self.get_all_pages(&url, "review comments").await
    }

    async fn list_commits(&self, number: u64) -> anyhow::Result<Vec<PullCommit>> {
        let url = self.repo_url(&format!("pulls/{}/commits", number));
        self.get_all_pages(&url, "commits").await
    }

    async fn get_issue(&self, number: &str) -> anyhow::Result<Issue> {
        self.get(&self.repo_url(&format!("issues/{}", number)))
            .send()
            .await
            .context("Failed to send issue request to GitHub")?
            .error_for_status()
            .context("GitHub issues API returned error status")?
            .json::<Issue>()
            .await
            .context("Failed to parse issue response from GitHub")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GitHubClient {
        GitHubClient::new(server.uri(), Some("ghs_test".into()), "octo", "widgets")
    }

    // ── deserialization ──────────────────────────────────────────────

    #[test]
    fn test_pull_request_null_body() {
        let pr: PullRequest = serde_json::from_str(r#"{"number": 3, "body": null}"#).unwrap();
        assert_eq!(pr.number, 3);
        assert!(pr.body.is_none());
    }

    #[test]
    fn test_pull_commit_deserialize() {
        let json = r#"{"sha": "abc", "commit": {"message": "fix #1", "author": {"name": "x"}}}"#;
        let commit: PullCommit = serde_json::from_str(json).unwrap();
        assert_eq!(commit.commit.message, "fix #1");
    }

    #[test]
    fn test_issue_state_deserialize() {
        let open: Issue = serde_json::from_str(r#"{"number": 1, "state": "open"}"#).unwrap();
        let closed: Issue = serde_json::from_str(r#"{"number": 2, "state": "closed"}"#).unwrap();
        assert_eq!(open.state, IssueState::Open);
        assert_eq!(closed.state, IssueState::Closed);
    }

    #[test]
    fn test_new_strips_trailing_slash_and_empty_token() {
        let client = GitHubClient::new("https://ghe.example.com/api/v3/", Some(String::new()), "o", "r");
        assert_eq!(client.repo_url("pulls/1"), "https://ghe.example.com/api/v3/repos/o/r/pulls/1");
        assert!(client.token.is_none());
    }

    // ── HTTP ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_get_pull_request_sends_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/pulls/17"))
            .and(header("Authorization", "Bearer ghs_test"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"number": 17, "body": "Fixes #4"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let pr = client(&server).get_pull_request(17).await.unwrap();
        assert_eq!(pr.number, 17);
        assert_eq!(pr.body.as_deref(), Some("Fixes #4"));
    }

    #[tokio::test]
    async fn test_get_pull_request_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/pulls/17"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server).get_pull_request(17).await.unwrap_err();
        assert!(format!("{:#}", err).contains("error status"));
    }

    #[tokio::test]
    async fn test_list_commits_follows_pages() {
        let server = MockServer::start().await;
        let full_page: Vec<_> = (0..PER_PAGE)
            .map(|i| serde_json::json!({"commit": {"message": format!("commit {}", i)}}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/pulls/9/commits"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(full_page))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/pulls/9/commits"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"commit": {"message": "closes #8"}}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let commits = client(&server).list_commits(9).await.unwrap();
        assert_eq!(commits.len(), PER_PAGE + 1);
        assert_eq!(commits.last().unwrap().commit.message, "closes #8");
    }

    #[tokio::test]
    async fn test_list_review_comments_single_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/pulls/9/comments"))
            .and(query_param("per_page", "100"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([
                    {"id": 1, "body": "closes #102"},
                    {"id": 2, "body": "nit"}
                ])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let comments = client(&server).list_review_comments(9).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].body, "closes #102");
    }

    #[tokio::test]
    async fn test_get_issue_closed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/issues/55"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"number": 55, "state": "closed", "title": "t"})),
            )
            .mount(&server)
            .await;

        let issue = client(&server).get_issue("55").await.unwrap();
        assert_eq!(issue.state, IssueState::Closed);
    }
}
