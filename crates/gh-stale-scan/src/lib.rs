//! Concurrent stale pull request discovery pipeline
//!
//! Scans every repository in an organization, keeps the ones subscribed to
//! a chat-notification hook (optionally narrowed to one room), fetches each
//! kept repository's open pull requests, and reports the ones older than a
//! configurable age threshold, oldest first.
//!
//! # Pipeline
//!
//! ```text
//! RepositoryLister ──▶ HookFilter ──▶ PullRequestScanner ──▶ sort ──▶ dispatch
//!        │                 │                  │
//!     paging        fan-out per repo   fan-out per repo
//! ```
//!
//! Each arrow is a bounded `mpsc` channel. The two fan-out stages spawn one
//! task per repository, gated by a semaphore, and close their downstream
//! only once the upstream channel is exhausted *and* every spawned task has
//! reported to the stage's [`tracker::CompletionTracker`]. Per-repository
//! failures are logged and absorbed; only a repository-listing failure is
//! fatal, and even then everything discovered beforehand is still scanned
//! and dispatched.

pub mod aggregate;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod hook_filter;
pub mod lister;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod tracker;

#[cfg(test)]
mod test_support;

pub use config::ScanConfig;
pub use error::ScanError;
pub use pipeline::run_scan;
pub use report::{ScanReport, StaleNotification};
