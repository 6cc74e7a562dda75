//! The reply dispatcher.

use std::sync::Arc;

use tracing::error;

use gambit_core::{MessageSender, OutboundMessage};

/// Per-event reply handle passed to listener callbacks.
///
/// Wraps the platform send primitive and the originating message's thread
/// anchor: when the anchor is present the reply is threaded under it,
/// otherwise it is posted top-level. Send failures are logged and swallowed
/// — a callback cannot fail because a reply did not go out, and nothing is
/// retried.
#[derive(Clone)]
pub struct Replier {
    sender: Arc<dyn MessageSender>,
    channel_id: String,
    thread_anchor: Option<String>,
}

impl Replier {
    /// Creates a reply handle bound to one originating message.
    pub fn new(
        sender: Arc<dyn MessageSender>,
        channel_id: impl Into<String>,
        thread_anchor: Option<String>,
    ) -> Self {
        Self {
            sender,
            channel_id: channel_id.into(),
            thread_anchor,
        }
    }

    /// Sends `text` back to the originating channel, threaded under the
    /// originating message when a thread anchor is available.
    pub async fn say(&self, text: impl Into<String>) {
        let text = text.into();
        let message = match &self.thread_anchor {
            Some(anchor) => OutboundMessage::threaded(&self.channel_id, text, anchor.clone()),
            None => OutboundMessage::top_level(&self.channel_id, text),
        };

        if let Err(e) = self.sender.send(message).await {
            error!(channel = %self.channel_id, error = %e, "failed to send reply");
        }
    }
}

impl std::fmt::Debug for Replier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Replier")
            .field("channel_id", &self.channel_id)
            .field("thread_anchor", &self.thread_anchor)
            .finish()
    }
}
