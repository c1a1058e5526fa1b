use async_trait::async_trait;

use crate::domain::errors::SourceResult;
use crate::domain::models::{
    Blob, PullRequest, RateLimitStatus, RepoRef, RepositoryInfo, TreeSnapshot,
};

/// Port trait for read access to a hosted repository
///
/// This is the only I/O capability the evaluation needs. Implementations must
/// be `Send + Sync` because every heuristic runs on its own tokio task and
/// shares one instance through an `Arc`.
///
/// Cancellation is handled by the caller dropping the returned futures, so
/// implementations must not spawn detached work of their own.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Fetch repository metadata (notably the default branch).
    async fn repository(&self, repo: &RepoRef) -> SourceResult<RepositoryInfo>;

    /// List the tree at `tree_ref` (a branch name or tree SHA).
    ///
    /// With `recursive` set every descendant path is returned and the result may
    /// be flagged as truncated; otherwise only direct children are listed.
    async fn tree(
        &self,
        repo: &RepoRef,
        tree_ref: &str,
        recursive: bool,
    ) -> SourceResult<TreeSnapshot>;

    /// Fetch a blob by content address.
    async fn blob(&self, repo: &RepoRef, sha: &str) -> SourceResult<Blob>;

    /// List a single page of pull requests in any state.
    async fn pull_requests(&self, repo: &RepoRef, per_page: u8) -> SourceResult<Vec<PullRequest>>;

    /// Query the remaining API quota.
    async fn rate_limit(&self) -> SourceResult<RateLimitStatus>;
}
