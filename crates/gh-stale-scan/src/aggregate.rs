//! Notification ordering
//!
//! The one synchronization point where the pipeline becomes sequential
//! again: the scanner's buffer, filled in whatever order the concurrent
//! fetches finished, is put into its final deterministic order here.

use crate::report::StaleNotification;

/// Order notifications by pull request creation time, oldest first.
///
/// The sort is stable, so notifications with equal timestamps keep their
/// discovery order.
pub fn sort_by_creation_time(mut notifications: Vec<StaleNotification>) -> Vec<StaleNotification> {
    notifications.sort_by_key(|n| n.pull_request.created_at);
    notifications
}
