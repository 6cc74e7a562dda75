//! Classified and command messages.
//!
//! Both types exist only for the duration of one dispatch pass: a
//! [`ClassifiedMessage`] is produced by the classifier and consumed by the
//! dispatcher; a [`CommandMessage`] is built fresh for the single callback
//! that matched and is discarded afterwards.

use crate::channel::ChannelInfo;
use crate::event::MessageCategory;

/// Formats the platform mention markup for a bot id.
///
/// `mention_token("U123")` yields `"<@U123>"` — the token the classifier
/// strips from direct mentions before pattern matching.
pub fn mention_token(bot_id: &str) -> String {
    format!("<@{bot_id}>")
}

/// The classifier's output: one inbound event with its category decided and
/// its text prepared for pattern matching.
#[derive(Debug, Clone)]
pub struct ClassifiedMessage {
    /// The single category this event falls into.
    pub category: MessageCategory,

    /// The text patterns are matched against. For direct mentions this has
    /// the bot-mention token stripped; otherwise it is the raw text.
    /// Whitespace is deliberately untrimmed — trimming happens only at
    /// [`CommandMessage`] construction.
    pub text: String,

    /// Sender id, defaulted to empty when the event lacked one.
    pub sender: String,

    /// Channel metadata resolved for this event.
    pub channel: ChannelInfo,

    /// Timestamp / thread anchor of the originating message.
    pub ts: Option<String>,
}

/// The normalized message handed to a listener callback.
///
/// Built from a [`ClassifiedMessage`] plus the capture groups of whichever
/// pattern matched. Owned exclusively by the one callback invocation the
/// dispatcher makes.
#[derive(Debug, Clone)]
pub struct CommandMessage {
    /// Sender id.
    pub sender: String,

    /// Channel metadata.
    pub channel: ChannelInfo,

    /// The matched text, trimmed of leading and trailing whitespace.
    pub text: String,

    /// Timestamp / thread anchor of the originating message.
    pub ts: Option<String>,

    /// Capture groups of the matching pattern. Index 0 is the whole match;
    /// unmatched optional groups are `None`.
    pub matches: Vec<Option<String>>,
}

impl CommandMessage {
    /// Returns capture group `index` of the matching pattern, if it
    /// participated in the match.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.matches.get(index).and_then(|g| g.as_deref())
    }
}
