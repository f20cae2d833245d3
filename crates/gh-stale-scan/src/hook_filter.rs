//! Hook filtering stage
//!
//! Consumes discovered repositories and forwards the ones subscribed to a
//! chat-notification hook into the confirmed-repository channel. One hook
//! check runs per repository, concurrently up to the configured bound; the
//! consuming loop never waits on an individual check.

use crate::tracker::{CompletionTracker, TaskOutcome};
use gh_client::{GitHubClient, HookConfig, Repository};
use log::{debug, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// Hook kind that carries chat-room notifications
pub const CHAT_HOOK_KIND: &str = "hipchat";

/// What the hook filter stage observed
#[derive(Debug, Default)]
pub struct HookFilterSummary {
    /// Repositories whose hooks were checked
    pub checked: usize,

    /// Repositories forwarded downstream
    pub confirmed: usize,

    /// Repositories whose hook listing failed
    pub failed: usize,
}

/// True if `hook` is a chat hook for the wanted room.
///
/// With no room configured, any chat hook qualifies.
fn hook_matches(hook: &HookConfig, room: Option<&str>) -> bool {
    if hook.kind != CHAT_HOOK_KIND {
        return false;
    }
    match room {
        Some(room) => hook.room.as_deref() == Some(room),
        None => true,
    }
}

/// First qualifying hook wins; later hooks are not inspected.
fn has_matching_hook(hooks: &[HookConfig], room: Option<&str>) -> bool {
    hooks.iter().any(|hook| hook_matches(hook, room))
}

/// Filter repositories from `rx` into `tx` by hook subscription.
///
/// The confirmed channel closes only after `rx` is exhausted and every
/// spawned hook check has reported. A failed check excludes only its own
/// repository.
pub async fn run_hook_filter(
    client: Arc<dyn GitHubClient>,
    room: Option<String>,
    concurrency: usize,
    mut rx: mpsc::Receiver<Repository>,
    tx: mpsc::Sender<Repository>,
) -> HookFilterSummary {
    let tracker = CompletionTracker::new();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let confirmed = Arc::new(AtomicUsize::new(0));

    while let Some(repo) = rx.recv().await {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => break,
        };

        let guard = tracker.start_task();
        let client = Arc::clone(&client);
        let tx = tx.clone();
        let room = room.clone();
        let confirmed = Arc::clone(&confirmed);

        tokio::spawn(async move {
            let _permit = permit;
            debug!("Checking hooks of {}", repo.full_name());

            match client.list_hooks(&repo.owner, &repo.name).await {
                Ok(hooks) => {
                    if has_matching_hook(&hooks, room.as_deref()) {
                        debug!("Including repository {}", repo.full_name());
                        if tx.send(repo).await.is_ok() {
                            confirmed.fetch_add(1, Ordering::SeqCst);
                        } else {
                            debug!("Confirmed channel closed, dropping match");
                        }
                    }
                    guard.finish(TaskOutcome::Ok);
                }
                Err(err) => {
                    warn!("Failed to fetch hooks for {}: {:#}", repo.full_name(), err);
                    guard.finish(TaskOutcome::ScopedError);
                }
            }
        });
    }

    // Upstream exhausted: wait out the in-flight checks, then let the
    // confirmed channel close by dropping our sender.
    tracker.seal();
    tracker.drained().await;

    HookFilterSummary {
        checked: tracker.spawned(),
        confirmed: confirmed.load(Ordering::SeqCst),
        failed: tracker.failed(),
    }
}
