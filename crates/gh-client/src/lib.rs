//! GitHub API client for organization-wide repository scanning
//!
//! This crate provides the trait-based seam between the scan pipeline and
//! the GitHub API. The pipeline only ever talks to the `GitHubClient`
//! trait; `OctocrabClient` is the direct implementation hitting the API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - list_repositories()                           │
//! │  - list_hooks()                                  │
//! │  - list_open_pull_requests()                     │
//! │  - rate_limit()                                  │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌─────────────────┐
//!              │ OctocrabClient  │
//!              │ (direct API)    │
//!              └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{GitHubClient, OctocrabClient};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let octocrab = octocrab::Octocrab::builder()
//!     .personal_token("token".to_string())
//!     .build()?;
//!
//! let client = OctocrabClient::new(Arc::new(octocrab));
//! let page = client.list_repositories("my-org", 1).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod octocrab_client;
pub mod types;

pub use client::GitHubClient;
pub use octocrab_client::OctocrabClient;
pub use types::{HookConfig, PullRequest, RateLimit, RepoPage, Repository};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
