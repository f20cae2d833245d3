//! Pipeline orchestration
//!
//! Wires the stages together with bounded channels and runs one scan to
//! completion. Stage order is fixed: lister → hook filter → scanner →
//! sort → dispatch. The first two run as their own tasks so all three
//! queue-connected stages make progress concurrently; sorting and
//! dispatch are sequential tail work on the finalized buffer.

use crate::aggregate::sort_by_creation_time;
use crate::config::ScanConfig;
use crate::dispatch::run_notification_dispatcher;
use crate::hook_filter::run_hook_filter;
use crate::lister::run_repository_lister;
use crate::report::ScanReport;
use crate::scanner::run_pull_request_scanner;
use chrono::Duration;
use gh_client::GitHubClient;
use hipchat_client::NotificationSink;
use log::{error, info};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Capacity of the discovered-repository channel
pub const RAW_REPO_QUEUE_CAPACITY: usize = 10;

/// Capacity of the confirmed-repository channel
pub const CONFIRMED_REPO_QUEUE_CAPACITY: usize = 100;

/// Run one scan of `config.org` to completion.
///
/// `repo_client` backs repository and pull request listing, `hook_client`
/// backs hook listing, mirroring the separate API tokens they are built
/// from. Always returns a report; a repository-listing failure is carried
/// in [`ScanReport::fatal`] after everything discovered before the
/// failure has been scanned and dispatched.
pub async fn run_scan(
    repo_client: Arc<dyn GitHubClient>,
    hook_client: Arc<dyn GitHubClient>,
    sink: Arc<dyn NotificationSink>,
    config: ScanConfig,
) -> ScanReport {
    info!(
        "Scanning {} for pull requests older than {} days",
        config.org, config.stale_after_days
    );

    let (raw_tx, raw_rx) = mpsc::channel(RAW_REPO_QUEUE_CAPACITY);
    let (confirmed_tx, confirmed_rx) = mpsc::channel(CONFIRMED_REPO_QUEUE_CAPACITY);

    let lister = tokio::spawn(run_repository_lister(
        Arc::clone(&repo_client),
        config.org.clone(),
        raw_tx,
    ));
    let filter = tokio::spawn(run_hook_filter(
        hook_client,
        config.room.clone(),
        config.concurrency,
        raw_rx,
        confirmed_tx,
    ));

    // The scanner is the tail consumer of the channel chain; run it here.
    let (stale, scan_summary) = run_pull_request_scanner(
        repo_client,
        Duration::days(config.stale_after_days),
        config.concurrency,
        confirmed_rx,
    )
    .await;

    // Its source channel closed, so both producer stages have finished.
    let filter_summary = match filter.await {
        Ok(summary) => summary,
        Err(err) => {
            error!("Hook filter task failed: {}", err);
            Default::default()
        }
    };
    let fatal = match lister.await {
        Ok(Ok(discovered)) => {
            info!("Repository listing complete: {} repositories", discovered);
            None
        }
        Ok(Err(err)) => {
            error!("Repository listing failed: {}", err);
            Some(err)
        }
        Err(err) => {
            error!("Repository lister task failed: {}", err);
            None
        }
    };

    info!(
        "Scanned {} of {} repositories, {} stale pull requests",
        scan_summary.scanned,
        filter_summary.checked,
        stale.len()
    );

    let ordered = sort_by_creation_time(stale);
    let room = config.room.clone().unwrap_or_default();
    let dispatch_summary = run_notification_dispatcher(sink.as_ref(), &room, &ordered).await;

    ScanReport {
        repositories_discovered: filter_summary.checked,
        repositories_confirmed: filter_summary.confirmed,
        hook_checks_failed: filter_summary.failed,
        scans_failed: scan_summary.failed,
        stale_total: ordered.len(),
        notifications_sent: dispatch_summary.sent,
        notifications_failed: dispatch_summary.failed,
        fatal,
    }
}
