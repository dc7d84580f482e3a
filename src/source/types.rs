use serde::Deserialize;

/// Metadata for one pull request as reported by a hosting service.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// Service-assigned pull request number
    pub id: u64,
    /// Pull request title
    pub title: String,
    /// Login of the author
    pub owner: String,
    /// Creation timestamp as the service formats it (ISO-8601)
    pub created_at: String,
    /// Free-form description body
    pub body: String,
}

/// One entry in a pull request's discussion thread.
///
/// Commit entries carry the SHA of the commit they mark; plain comments do
/// not. Callers dispatch on the variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[allow(dead_code)] // Fields read by discussion-capable frontends; exercised in tests
pub enum DiscussionEntry {
    Comment {
        author: String,
        created_at: String,
        body: String,
    },
    CommitComment {
        author: String,
        created_at: String,
        body: String,
        sha: String,
    },
}
