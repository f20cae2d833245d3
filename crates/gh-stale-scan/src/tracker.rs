//! Per-stage completion tracking
//!
//! A fan-out stage spawns one task per repository while its upstream
//! channel is open. The stage may only close its downstream once two
//! things are true: the upstream channel is exhausted (no more spawns
//! will happen), and every task it spawned has reported. The tracker
//! encodes exactly that: [`CompletionTracker::seal`] marks the first
//! condition, [`CompletionTracker::drained`] waits for the second.
//!
//! Every spawned task holds a [`TaskGuard`] and reports exactly once:
//! explicitly via [`TaskGuard::finish`], or as a scoped error when the
//! guard is dropped without finishing (task aborted mid-flight).

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// How a spawned task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The task ran to completion (match, no-match, or empty result)
    Ok,

    /// The task failed; its repository contributes nothing further
    ScopedError,
}

/// Counts tasks spawned and finished for one pipeline stage
#[derive(Debug, Default)]
pub struct CompletionTracker {
    spawned: AtomicUsize,
    finished: AtomicUsize,
    failed: AtomicUsize,
    sealed: AtomicBool,
    notify: Notify,
}

impl CompletionTracker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a task. The returned guard must travel into the task.
    pub fn start_task(self: &Arc<Self>) -> TaskGuard {
        self.spawned.fetch_add(1, Ordering::SeqCst);
        TaskGuard {
            tracker: Arc::clone(self),
            reported: false,
        }
    }

    /// Mark that no further tasks will be started.
    ///
    /// Called exactly once, when the stage's upstream channel closes.
    pub fn seal(&self) {
        self.sealed.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Total tasks started
    pub fn spawned(&self) -> usize {
        self.spawned.load(Ordering::SeqCst)
    }

    /// Tasks that reported a scoped error
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// True once the tracker is sealed and every task has reported
    pub fn is_drained(&self) -> bool {
        self.sealed.load(Ordering::SeqCst)
            && self.finished.load(Ordering::SeqCst) == self.spawned.load(Ordering::SeqCst)
    }

    /// Wait until the tracker is sealed and every task has reported.
    ///
    /// After this returns the stage is allowed to close its downstream.
    pub async fn drained(&self) {
        loop {
            if self.is_drained() {
                return;
            }

            // Register for wakeup before re-checking, so a report landing
            // between the check and the await is not missed.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.is_drained() {
                return;
            }
            notified.await;
        }
    }

    fn record(&self, outcome: TaskOutcome) {
        if outcome == TaskOutcome::ScopedError {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
        self.finished.fetch_add(1, Ordering::SeqCst);
        self.notify.notify_waiters();
    }
}

/// Reports one task's completion to its tracker, exactly once
#[derive(Debug)]
pub struct TaskGuard {
    tracker: Arc<CompletionTracker>,
    reported: bool,
}

impl TaskGuard {
    /// Report the task's outcome.
    pub fn finish(mut self, outcome: TaskOutcome) {
        self.reported = true;
        self.tracker.record(outcome);
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        // A guard dropped without finishing still reports, so the stage
        // can never wait forever on a task that went away.
        if !self.reported {
            self.tracker.record(TaskOutcome::ScopedError);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_sealed_empty_tracker_is_drained() {
        let tracker = CompletionTracker::new();
        tracker.seal();

        assert!(tracker.is_drained());
        timeout(Duration::from_secs(1), tracker.drained())
            .await
            .expect("drained should resolve immediately");
    }

    #[tokio::test]
    async fn test_unsealed_tracker_is_not_drained() {
        let tracker = CompletionTracker::new();
        assert!(!tracker.is_drained());

        let guard = tracker.start_task();
        guard.finish(TaskOutcome::Ok);

        // All tasks reported, but no seal yet: more could still be spawned.
        assert!(!tracker.is_drained());
    }

    #[tokio::test]
    async fn test_drained_waits_for_outstanding_tasks() {
        let tracker = CompletionTracker::new();
        let guard = tracker.start_task();
        tracker.seal();

        assert!(!tracker.is_drained());

        let waiter = {
            let tracker = Arc::clone(&tracker);
            tokio::spawn(async move { tracker.drained().await })
        };

        // The waiter cannot complete before the task reports.
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        guard.finish(TaskOutcome::Ok);
        timeout(Duration::from_secs(1), waiter)
            .await
            .expect("drained should resolve after the last report")
            .expect("waiter task should not panic");
    }

    #[tokio::test]
    async fn test_dropped_guard_reports_scoped_error() {
        let tracker = CompletionTracker::new();
        let guard = tracker.start_task();
        tracker.seal();

        drop(guard);

        assert!(tracker.is_drained());
        assert_eq!(tracker.failed(), 1);
    }

    #[tokio::test]
    async fn test_finish_reports_once() {
        let tracker = CompletionTracker::new();
        let guard = tracker.start_task();
        guard.finish(TaskOutcome::Ok);
        tracker.seal();

        assert!(tracker.is_drained());
        assert_eq!(tracker.spawned(), 1);
        assert_eq!(tracker.failed(), 0);
    }

    #[tokio::test]
    async fn test_failure_tally() {
        let tracker = CompletionTracker::new();
        tracker.start_task().finish(TaskOutcome::Ok);
        tracker.start_task().finish(TaskOutcome::ScopedError);
        tracker.start_task().finish(TaskOutcome::ScopedError);
        tracker.seal();

        assert_eq!(tracker.spawned(), 3);
        assert_eq!(tracker.failed(), 2);
        assert!(tracker.is_drained());
    }
}
