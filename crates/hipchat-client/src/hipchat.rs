//! HipChat v2 API implementation of the notification sink

use crate::sink::NotificationSink;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use log::debug;
use reqwest::Url;
use serde::Serialize;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://api.hipchat.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HipChat room notification client
///
/// Posts to `POST /v2/room/{room}/notification` with a bearer token.
#[derive(Debug, Clone)]
pub struct HipChatClient {
    client: reqwest::Client,
    base_url: Url,
    token: String,
}

/// Request body for the room notification endpoint
#[derive(Debug, Serialize)]
struct RoomNotification<'a> {
    message: &'a str,
    message_format: &'static str,
    notify: bool,
}

impl HipChatClient {
    /// Create a client against the public HipChat API
    pub fn new(token: impl Into<String>) -> anyhow::Result<Self> {
        Self::with_base_url(token, DEFAULT_API_BASE)
    }

    /// Create a client against a self-hosted HipChat server
    pub fn with_base_url(token: impl Into<String>, base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build reqwest client")?;
        let base_url = Url::parse(base_url).context("parse HipChat base URL")?;

        Ok(Self {
            client,
            base_url,
            token: token.into(),
        })
    }

    fn notification_url(&self, room: &str) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("HipChat base URL cannot be a base"))?
            .pop_if_empty()
            .extend(["v2", "room", room, "notification"]);
        Ok(url)
    }
}

#[async_trait]
impl NotificationSink for HipChatClient {
    async fn send_message(&self, room: &str, text: &str) -> anyhow::Result<()> {
        debug!("Sending notification to room {}", room);

        let body = RoomNotification {
            message: text,
            message_format: "text",
            notify: false,
        };

        let url = self.notification_url(room)?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("send notification to room {}", room))?;

        response
            .error_for_status()
            .with_context(|| format!("HipChat rejected notification for room {}", room))?;

        Ok(())
    }
}
