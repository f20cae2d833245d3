//! Notification sink trait definition

use async_trait::async_trait;

/// Chat message delivery trait
///
/// One method: deliver one message to one room. Implementations must be
/// `Send + Sync` so the sink can be shared across async tasks.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a single message to a room
    ///
    /// # Arguments
    ///
    /// * `room` - Room identifier or name
    /// * `text` - Message body
    async fn send_message(&self, room: &str, text: &str) -> anyhow::Result<()>;
}
