use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::types::{DiscussionEntry, PullRequest};
use super::{DiscussionSource, PullRequestSource, SourceError};

const DEMO_SEED: &str = include_str!("../../tests/fixtures/demo_pr.json");
const DEMO_DIFF: &str = include_str!("../../tests/fixtures/sample.diff");

// The demo has no clock or logged-in user; posted comments get fixed values.
const POSTED_BY: &str = "demo-user";
const POSTED_AT: &str = "2024-04-02T12:00:00Z";

/// In-memory pull request source backed by fixtures embedded at compile
/// time: one pull request, its combined diff, and a small discussion thread.
///
/// Stands in for a hosting-backed source so the whole pipeline can run
/// without a network or credentials.
pub struct DemoSource {
    pull_request: PullRequest,
    diff: &'static str,
    entries: Mutex<Vec<DiscussionEntry>>,
    closed: Mutex<bool>,
}

#[derive(Deserialize)]
struct DemoSeed {
    pull_request: PullRequest,
    discussion: Vec<DiscussionEntry>,
}

impl DemoSource {
    pub fn new() -> Result<DemoSource, SourceError> {
        let seed: DemoSeed = serde_json::from_str(DEMO_SEED)?;
        Ok(DemoSource {
            pull_request: seed.pull_request,
            diff: DEMO_DIFF,
            entries: Mutex::new(seed.discussion),
            closed: Mutex::new(false),
        })
    }

    fn ensure_known(&self, id: u64) -> Result<(), SourceError> {
        if id == self.pull_request.id {
            Ok(())
        } else {
            Err(SourceError::UnknownPullRequest(id))
        }
    }
}

#[async_trait]
impl PullRequestSource for DemoSource {
    async fn pull_requests(&self) -> Result<Vec<PullRequest>, SourceError> {
        if *self.closed.lock().await {
            return Ok(Vec::new());
        }
        Ok(vec![self.pull_request.clone()])
    }

    async fn diff_text(&self, id: u64) -> Result<String, SourceError> {
        self.ensure_known(id)?;
        Ok(self.diff.to_string())
    }

    async fn close(&self, id: u64) -> Result<(), SourceError> {
        self.ensure_known(id)?;
        *self.closed.lock().await = true;
        Ok(())
    }
}

#[async_trait]
impl DiscussionSource for DemoSource {
    async fn entries(&self, id: u64) -> Result<Vec<DiscussionEntry>, SourceError> {
        self.ensure_known(id)?;
        Ok(self.entries.lock().await.clone())
    }

    async fn post(&self, id: u64, text: &str) -> Result<(), SourceError> {
        self.ensure_known(id)?;
        if text.trim().is_empty() {
            return Ok(());
        }
        self.entries.lock().await.push(DiscussionEntry::Comment {
            author: POSTED_BY.to_string(),
            created_at: POSTED_AT.to_string(),
            body: text.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::parse_diff;

    #[tokio::test]
    async fn test_lists_the_demo_pull_request() {
        let source = DemoSource::new().unwrap();
        let pull_requests = source.pull_requests().await.unwrap();
        assert_eq!(pull_requests.len(), 1);
        assert_eq!(pull_requests[0].owner, "alice");
    }

    #[tokio::test]
    async fn test_demo_diff_parses() {
        let source = DemoSource::new().unwrap();
        let id = source.pull_requests().await.unwrap()[0].id;
        let blob = source.diff_text(id).await.unwrap();
        let records = parse_diff(&blob).unwrap();
        let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "src/sync/worker.rs",
                "src/sync/retry.rs",
                "docs/sync-failures.md"
            ]
        );
        assert!(records[1].is_new());
        assert!(records[2].is_deleted());
    }

    #[tokio::test]
    async fn test_unknown_id_is_an_error() {
        let source = DemoSource::new().unwrap();
        let result = source.diff_text(999).await;
        assert!(matches!(result, Err(SourceError::UnknownPullRequest(999))));
    }

    #[tokio::test]
    async fn test_close_hides_the_pull_request() {
        let source = DemoSource::new().unwrap();
        let id = source.pull_requests().await.unwrap()[0].id;
        source.close(id).await.unwrap();
        assert!(source.pull_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_appends_a_comment() {
        let source = DemoSource::new().unwrap();
        let id = source.pull_requests().await.unwrap()[0].id;
        let before = source.entries(id).await.unwrap().len();

        source.post(id, "Ship it.").await.unwrap();

        let entries = source.entries(id).await.unwrap();
        assert_eq!(entries.len(), before + 1);
        match entries.last().unwrap() {
            DiscussionEntry::Comment { author, body, .. } => {
                assert_eq!(author, POSTED_BY);
                assert_eq!(body, "Ship it.");
            }
            other => panic!("expected Comment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_post_is_ignored() {
        let source = DemoSource::new().unwrap();
        let id = source.pull_requests().await.unwrap()[0].id;
        let before = source.entries(id).await.unwrap().len();
        source.post(id, "   \n").await.unwrap();
        assert_eq!(source.entries(id).await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_seed_thread_has_a_commit_entry() {
        let source = DemoSource::new().unwrap();
        let id = source.pull_requests().await.unwrap()[0].id;
        let entries = source.entries(id).await.unwrap();
        assert!(entries
            .iter()
            .any(|entry| matches!(entry, DiscussionEntry::CommitComment { .. })));
    }
}
