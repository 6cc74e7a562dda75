//! Outbound messages and the platform send primitive.

use async_trait::async_trait;

use crate::error::SendResult;

/// A message to be sent back to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Platform id of the destination channel.
    pub channel_id: String,

    /// The reply text.
    pub text: String,

    /// When set, the platform threads the reply under the message with this
    /// timestamp; otherwise it is posted top-level.
    pub thread_anchor: Option<String>,
}

impl OutboundMessage {
    /// Creates a top-level message.
    pub fn top_level(channel_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            text: text.into(),
            thread_anchor: None,
        }
    }

    /// Creates a reply threaded under `anchor`.
    pub fn threaded(
        channel_id: impl Into<String>,
        text: impl Into<String>,
        anchor: impl Into<String>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            text: text.into(),
            thread_anchor: Some(anchor.into()),
        }
    }
}

/// Collaborator wrapping the platform's opaque send primitive.
///
/// Callbacks never touch this directly — the reply dispatcher in the
/// framework layer decides threading and swallows send failures (logged,
/// not retried, not propagated).
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends `message` to its destination channel.
    async fn send(&self, message: OutboundMessage) -> SendResult<()>;
}
