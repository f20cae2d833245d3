//! HipChat room notification client
//!
//! The pipeline's messaging seam. The dispatcher only talks to the
//! `NotificationSink` trait; `HipChatClient` is the implementation that
//! posts room notifications to the HipChat v2 API.

pub mod hipchat;
pub mod sink;

pub use hipchat::HipChatClient;
pub use sink::NotificationSink;
