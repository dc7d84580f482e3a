pub mod demo;
pub mod types;

pub use demo::DemoSource;
pub use types::{DiscussionEntry, PullRequest};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Unknown pull request id: {0}")]
    UnknownPullRequest(u64),

    #[error("Failed to decode pull request payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A hosting service that can enumerate pull requests and hand out the
/// combined diff blob for each one.
///
/// Implementations must be Send + Sync so callers can fetch concurrently
/// (e.g. speculative pre-fetch of several pull requests).
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Currently open pull requests, in the order the service reports them.
    async fn pull_requests(&self) -> Result<Vec<PullRequest>, SourceError>;

    /// The combined multi-file diff for one pull request, ready for
    /// [`crate::diff::parse_diff`].
    async fn diff_text(&self, id: u64) -> Result<String, SourceError>;

    /// Close the pull request on the hosting side.
    #[allow(dead_code)] // Surfaced to frontends that manage pull request state
    async fn close(&self, id: u64) -> Result<(), SourceError>;
}

/// The discussion thread attached to a pull request.
#[allow(dead_code)] // Consumed by discussion-capable frontends; exercised in tests
#[async_trait]
pub trait DiscussionSource: Send + Sync {
    /// Thread entries, oldest first.
    async fn entries(&self, id: u64) -> Result<Vec<DiscussionEntry>, SourceError>;

    /// Append a comment to the thread. Blank text is ignored.
    async fn post(&self, id: u64, text: &str) -> Result<(), SourceError>;
}
