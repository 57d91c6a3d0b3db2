//! Text collection: the pull request body, then every review comment, then
//! every commit message.

use crate::errors::RunError;
use crate::github::SourceControl;
use crate::references::{TextBlock, TextSource};

pub async fn collect_text_blocks(
    scm: &dyn SourceControl,
    pr_number: u64,
) -> Result<Vec<TextBlock>, RunError> {
    let mut blocks = Vec::new();

    let pr = scm
        .get_pull_request(pr_number)
        .await
        .map_err(|source| RunError::PullRequestFetch {
            number: pr_number,
            source,
        })?;

    if let Some(body) = pr.body.filter(|b| !b.is_empty()) {
        tracing::info!("found pull body: {}", body);
        blocks.push(TextBlock::new(TextSource::PullRequestBody, body));
    }

    let comments = scm
        .list_review_comments(pr.number)
        .await
        .map_err(|source| RunError::ReviewCommentsFetch {
            number: pr.number,
            source,
        })?;

    let commits = scm
        .list_commits(pr.number)
        .await
        .map_err(|source| RunError::CommitsFetch {
            number: pr.number,
            source,
        })?;

    tracing::info!("found {} review comments to scan on the pull", comments.len());
    blocks.extend(
        comments
            .into_iter()
            .map(|c| TextBlock::new(TextSource::ReviewComment, c.body)),
    );

    tracing::info!("found {} commits to scan on the pull", commits.len());
    for commit in commits {
        tracing::debug!(message = %commit.commit.message, "commit");
        blocks.push(TextBlock::new(TextSource::CommitMessage, commit.commit.message));
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{MemorySourceControl, ScmFailure};

    #[tokio::test]
    async fn test_collects_in_discovery_order() {
        let scm = MemorySourceControl::new()
            .with_body("Fixes #101")
            .with_comment("closes #102")
            .with_commit("first")
            .with_commit("second");

        let blocks = collect_text_blocks(&scm, 7).await.unwrap();
        let sources: Vec<_> = blocks.iter().map(|b| b.source).collect();
        assert_eq!(
            sources,
            vec![
                TextSource::PullRequestBody,
                TextSource::ReviewComment,
                TextSource::CommitMessage,
                TextSource::CommitMessage,
            ]
        );
        assert_eq!(blocks[0].text, "Fixes #101");
        assert_eq!(blocks[3].text, "second");
    }

    #[tokio::test]
    async fn test_missing_body_is_skipped() {
        let scm = MemorySourceControl::new().with_commit("only commit");
        let blocks = collect_text_blocks(&scm, 7).await.unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].source, TextSource::CommitMessage);
    }

    #[tokio::test]
    async fn test_pull_request_failure_is_fatal() {
        let scm = MemorySourceControl::new().failing(ScmFailure::PullRequest);
        let err = collect_text_blocks(&scm, 7).await.unwrap_err();
        assert!(matches!(err, RunError::PullRequestFetch { number: 7, .. }));
    }

    #[tokio::test]
    async fn test_comment_failure_is_fatal() {
        let scm = MemorySourceControl::new()
            .with_body("Fixes #1")
            .failing(ScmFailure::ReviewComments);
        let err = collect_text_blocks(&scm, 7).await.unwrap_err();
        assert!(matches!(err, RunError::ReviewCommentsFetch { .. }));
    }

    #[tokio::test]
    async fn test_commit_failure_is_fatal() {
        let scm = MemorySourceControl::new().failing(ScmFailure::Commits);
        let err = collect_text_blocks(&scm, 7).await.unwrap_err();
        assert!(matches!(err, RunError::CommitsFetch { .. }));
    }
}
