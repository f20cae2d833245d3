//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API. They are
//! intentionally small: the scan pipeline only needs repository identity,
//! hook configuration, and enough pull request data to classify staleness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository discovered while paging through an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Full name in "owner/name" format
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// One page of an organization's repository listing
///
/// `next_page` is `None` once the source reports no further pages.
#[derive(Debug, Clone, Default)]
pub struct RepoPage {
    /// Repositories on this page
    pub repositories: Vec<Repository>,

    /// Page number to request next, if any
    pub next_page: Option<u32>,
}

/// A webhook configuration record on a repository
///
/// Fetched on demand and discarded after the match decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookConfig {
    /// Hook kind as reported by the API (e.g., "hipchat", "web")
    pub kind: String,

    /// Chat room the hook posts to, when configured
    pub room: Option<String>,
}

/// An open pull request from the GitHub API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    pub title: String,

    /// When the PR was created
    pub created_at: DateTime<Utc>,

    /// PR URL for display in notifications
    pub html_url: String,
}

/// API rate limit status for one client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimit {
    /// Maximum requests per window
    pub limit: u64,

    /// Requests remaining in the current window
    pub remaining: u64,

    /// When the current window resets
    pub reset: DateTime<Utc>,
}
