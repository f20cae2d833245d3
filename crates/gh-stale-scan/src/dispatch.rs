//! Notification delivery stage
//!
//! Sequential on purpose: delivery order must match the sorted order, so
//! there is no fan-out here. One failed delivery is logged and the rest
//! are still attempted.

use crate::report::StaleNotification;
use hipchat_client::NotificationSink;
use log::{error, info};

/// What the dispatcher observed
#[derive(Debug, Default)]
pub struct DispatchSummary {
    /// Notifications delivered
    pub sent: usize,

    /// Notifications the sink rejected
    pub failed: usize,
}

/// The human-readable notification text for one stale pull request
pub fn format_message(notification: &StaleNotification) -> String {
    format!(
        "Pull Request is {} days old: {}",
        notification.age_days, notification.pull_request.html_url
    )
}

/// Deliver each notification to `room`, in order, without retries.
pub async fn run_notification_dispatcher(
    sink: &dyn NotificationSink,
    room: &str,
    notifications: &[StaleNotification],
) -> DispatchSummary {
    let mut summary = DispatchSummary::default();

    for notification in notifications {
        let text = format_message(notification);
        match sink.send_message(room, &text).await {
            Ok(()) => {
                info!("{}", text);
                summary.sent += 1;
            }
            Err(err) => {
                error!(
                    "Failed to deliver notification for {}: {:#}",
                    notification.pull_request.html_url, err
                );
                summary.failed += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{repo, MockSink};
    use chrono::{Duration, Utc};
    use gh_client::PullRequest;

    fn notification(number: u64, age_days: i64) -> StaleNotification {
        StaleNotification {
            repository: repo("widgets"),
            pull_request: PullRequest {
                number,
                title: format!("PR #{}", number),
                created_at: Utc::now() - Duration::days(age_days),
                html_url: format!("https://github.com/acme/widgets/pull/{}", number),
            },
            age_days,
        }
    }

    #[test]
    fn test_message_format() {
        let text = format_message(&notification(17, 5));
        assert_eq!(
            text,
            "Pull Request is 5 days old: https://github.com/acme/widgets/pull/17"
        );
    }

    #[tokio::test]
    async fn test_delivers_in_input_order() {
        let sink = MockSink::new();
        let notifications = vec![notification(1, 10), notification(2, 5), notification(3, 4)];

        let summary = run_notification_dispatcher(&sink, "ops", &notifications).await;

        assert_eq!(summary.sent, 3);
        assert_eq!(summary.failed, 0);

        let messages = sink.messages();
        assert!(messages[0].1.contains("/pull/1"));
        assert!(messages[1].1.contains("/pull/2"));
        assert!(messages[2].1.contains("/pull/3"));
        assert!(messages.iter().all(|(room, _)| room == "ops"));
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_deliveries() {
        let sink = MockSink::new().fail_messages_containing("/pull/2");
        let notifications = vec![notification(1, 10), notification(2, 5), notification(3, 4)];

        let summary = run_notification_dispatcher(&sink, "ops", &notifications).await;

        assert_eq!(summary.sent, 2);
        assert_eq!(summary.failed, 1);

        let messages = sink.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].1.contains("/pull/3"));
    }

    #[tokio::test]
    async fn test_no_notifications() {
        let sink = MockSink::new();
        let summary = run_notification_dispatcher(&sink, "ops", &[]).await;
        assert_eq!(summary.sent, 0);
        assert_eq!(summary.failed, 0);
    }
}
