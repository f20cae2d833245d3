//! Stdout notification sink
//!
//! Used when no chat room is configured: the pipeline still runs end to
//! end and each notification is printed instead of posted.

use async_trait::async_trait;
use hipchat_client::NotificationSink;

#[derive(Debug, Default)]
pub struct StdoutSink;

#[async_trait]
impl NotificationSink for StdoutSink {
    async fn send_message(&self, _room: &str, text: &str) -> anyhow::Result<()> {
        println!("{}", text);
        Ok(())
    }
}
