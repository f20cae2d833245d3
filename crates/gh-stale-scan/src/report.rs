//! Scan results

use crate::error::ScanError;
use gh_client::{PullRequest, Repository};

/// A stale pull request queued for notification
///
/// Created by the scanner stage, consumed once by the dispatcher.
#[derive(Debug, Clone)]
pub struct StaleNotification {
    /// Repository the pull request belongs to
    pub repository: Repository,

    /// The stale pull request itself
    pub pull_request: PullRequest,

    /// Whole days since the pull request was opened
    pub age_days: i64,
}

/// Outcome of one pipeline run
///
/// Always produced, even when repository discovery failed part-way; in
/// that case `fatal` carries the error and the counts cover everything
/// processed before the failure.
#[derive(Debug)]
pub struct ScanReport {
    /// Repositories discovered by the lister
    pub repositories_discovered: usize,

    /// Repositories with a matching notification hook
    pub repositories_confirmed: usize,

    /// Repositories whose hook listing failed (excluded from the scan)
    pub hook_checks_failed: usize,

    /// Confirmed repositories whose pull request listing failed
    pub scans_failed: usize,

    /// Stale pull requests found
    pub stale_total: usize,

    /// Notifications delivered
    pub notifications_sent: usize,

    /// Notifications that could not be delivered
    pub notifications_failed: usize,

    /// The discovery error, if repository listing failed
    pub fatal: Option<ScanError>,
}
