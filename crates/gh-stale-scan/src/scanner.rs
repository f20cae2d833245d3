//! Pull request scanning stage
//!
//! Consumes confirmed repositories, fetches each one's open pull requests
//! concurrently, and collects the stale ones into a shared buffer. The
//! buffer is handed back only once the source channel is exhausted and
//! every fetch has reported.

use crate::report::StaleNotification;
use crate::tracker::{CompletionTracker, TaskOutcome};
use chrono::{DateTime, Duration, Utc};
use gh_client::{GitHubClient, Repository};
use log::{debug, warn};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, Semaphore};

/// What the scanner stage observed
#[derive(Debug, Default)]
pub struct ScannerSummary {
    /// Repositories scanned
    pub scanned: usize,

    /// Repositories whose pull request listing failed
    pub failed: usize,
}

/// True if a pull request created at `created_at` is stale at `now`.
///
/// Strictly older than the threshold: a pull request created exactly
/// `stale_after` ago is not yet stale.
pub fn is_stale(created_at: DateTime<Utc>, now: DateTime<Utc>, stale_after: Duration) -> bool {
    now - created_at > stale_after
}

/// Scan repositories from `rx`, collecting stale pull requests.
///
/// A failed fetch counts as zero stale items for that repository. The
/// returned buffer is final: no task can append after this returns.
pub async fn run_pull_request_scanner(
    client: Arc<dyn GitHubClient>,
    stale_after: Duration,
    concurrency: usize,
    mut rx: mpsc::Receiver<Repository>,
) -> (Vec<StaleNotification>, ScannerSummary) {
    let tracker = CompletionTracker::new();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let results: Arc<Mutex<Vec<StaleNotification>>> = Arc::new(Mutex::new(Vec::new()));

    while let Some(repo) = rx.recv().await {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => break,
        };

        let guard = tracker.start_task();
        let client = Arc::clone(&client);
        let results = Arc::clone(&results);

        tokio::spawn(async move {
            let _permit = permit;
            debug!("Scanning {} for stale pull requests", repo.full_name());

            match client.list_open_pull_requests(&repo.owner, &repo.name).await {
                Ok(prs) => {
                    let now = Utc::now();
                    let stale: Vec<StaleNotification> = prs
                        .into_iter()
                        .filter(|pr| is_stale(pr.created_at, now, stale_after))
                        .map(|pr| StaleNotification {
                            repository: repo.clone(),
                            age_days: (now - pr.created_at).num_days(),
                            pull_request: pr,
                        })
                        .collect();

                    if !stale.is_empty() {
                        debug!(
                            "Found {} stale pull requests in {}",
                            stale.len(),
                            repo.full_name()
                        );
                        let mut buffer = results.lock().unwrap_or_else(|e| e.into_inner());
                        buffer.extend(stale);
                    }
                    guard.finish(TaskOutcome::Ok);
                }
                Err(err) => {
                    warn!(
                        "Failed to fetch pull requests for {}: {:#}",
                        repo.full_name(),
                        err
                    );
                    guard.finish(TaskOutcome::ScopedError);
                }
            }
        });
    }

    // Upstream exhausted: all appends are in by the time the tracker drains.
    tracker.seal();
    tracker.drained().await;

    let summary = ScannerSummary {
        scanned: tracker.spawned(),
        failed: tracker.failed(),
    };

    let collected = match Arc::try_unwrap(results) {
        Ok(mutex) => mutex.into_inner().unwrap_or_else(|e| e.into_inner()),
        // A finished task may still hold its clone for an instant; drain
        // through the lock instead.
        Err(shared) => {
            let mut buffer = shared.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *buffer)
        }
    };

    (collected, summary)
}
