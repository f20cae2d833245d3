//! GitHub client trait definition
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy. The scan pipeline depends only on this
//! trait, which keeps every stage testable against mock clients.

use crate::types::{HookConfig, PullRequest, RateLimit, RepoPage};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Defines the interface for the read-only API surface the scanner needs.
/// Implementations can be direct (hitting the API) or decorated with
/// rate limiting, retry logic, etc.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch one page of an organization's repositories
    ///
    /// # Arguments
    ///
    /// * `org` - Organization login
    /// * `page` - 1-based page number
    ///
    /// # Returns
    ///
    /// The repositories on that page and the next page number, or `None`
    /// when the listing is exhausted.
    async fn list_repositories(&self, org: &str, page: u32) -> anyhow::Result<RepoPage>;

    /// Fetch the webhook configurations of a repository
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner (user or organization)
    /// * `repo` - Repository name
    async fn list_hooks(&self, owner: &str, repo: &str) -> anyhow::Result<Vec<HookConfig>>;

    /// Fetch all open pull requests for a repository
    ///
    /// Pages through the listing internally and returns the full set.
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    async fn list_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> anyhow::Result<Vec<PullRequest>>;

    /// Fetch the current API rate limit status for this client
    async fn rate_limit(&self) -> anyhow::Result<RateLimit>;
}
