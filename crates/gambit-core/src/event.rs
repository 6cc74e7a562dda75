//! Inbound event model.
//!
//! An [`InboundEvent`] is the raw, category-agnostic payload the platform
//! transport hands to the dispatcher. Classification into a
//! [`MessageCategory`] happens later, in the framework layer — the event
//! itself only records what the platform told us.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Message Categories
// ============================================================================

/// Classification of how a message reached the bot.
///
/// Exactly one category applies to any inbound event. Listeners declare the
/// subset of categories they react to, so the category is the first gate in
/// dispatch — before any pattern is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    /// The message tags the bot directly (`<@BOT>` in the text, or the
    /// platform delivered it as an explicit mention event).
    DirectMention,
    /// A message in a one-on-one direct-message channel with the bot.
    DirectMessage,
    /// A message originating from another bot.
    BotRelayed,
    /// A message in a channel the bot is present in, without tagging it.
    Ambient,
}

impl MessageCategory {
    /// Returns the category name as used in configuration and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectMention => "direct_mention",
            Self::DirectMessage => "direct_message",
            Self::BotRelayed => "bot_relayed",
            Self::Ambient => "ambient",
        }
    }
}

impl std::fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct_mention" => Ok(Self::DirectMention),
            "direct_message" => Ok(Self::DirectMessage),
            "bot_relayed" | "bot_message" => Ok(Self::BotRelayed),
            "ambient" => Ok(Self::Ambient),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Delivery Discriminator
// ============================================================================

/// How the platform delivered an event to us.
///
/// Platforms disambiguate at the transport level: a message that tags the
/// bot arrives as a dedicated mention event, everything else arrives on the
/// ambient message stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    /// Delivered on the ambient message stream.
    Message,
    /// Delivered as an explicit mention event; the platform has already
    /// established that the bot was tagged.
    Mention,
}

// ============================================================================
// Inbound Event
// ============================================================================

/// Subtype value platforms attach to messages authored by a bot.
pub(crate) const BOT_MESSAGE_SUBTYPE: &str = "bot_message";

/// A raw inbound event as delivered by the platform transport.
///
/// Optional fields reflect the platform's payloads being loosely shaped:
/// a missing `text` or `sender` never fails an event — the classifier
/// defaults them to empty instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Platform id of the user who sent the message.
    #[serde(default)]
    pub sender: Option<String>,

    /// Platform id of the channel the message arrived in.
    pub channel_id: String,

    /// The raw message text.
    #[serde(default)]
    pub text: Option<String>,

    /// Timestamp of the message, doubling as the thread anchor for replies.
    #[serde(default)]
    pub ts: Option<String>,

    /// Message subtype, when the platform sets one (e.g. `bot_message`).
    #[serde(default)]
    pub subtype: Option<String>,

    /// Id of the authoring bot, present only on bot-originated messages.
    #[serde(default)]
    pub bot_id: Option<String>,

    /// Which event stream this arrived on.
    pub delivery: Delivery,
}

impl InboundEvent {
    /// Creates an event as delivered on the ambient message stream.
    pub fn message(
        channel_id: impl Into<String>,
        sender: impl Into<String>,
        text: impl Into<String>,
        ts: impl Into<String>,
    ) -> Self {
        Self {
            sender: Some(sender.into()),
            channel_id: channel_id.into(),
            text: Some(text.into()),
            ts: Some(ts.into()),
            subtype: None,
            bot_id: None,
            delivery: Delivery::Message,
        }
    }

    /// Creates an event as delivered by an explicit mention event.
    pub fn mention(
        channel_id: impl Into<String>,
        sender: impl Into<String>,
        text: impl Into<String>,
        ts: impl Into<String>,
    ) -> Self {
        Self {
            delivery: Delivery::Mention,
            ..Self::message(channel_id, sender, text, ts)
        }
    }

    /// Marks this event as authored by another bot.
    pub fn from_bot(mut self, bot_id: impl Into<String>) -> Self {
        self.bot_id = Some(bot_id.into());
        self
    }

    /// Returns whether the payload carries a bot-origin marker
    /// (a `bot_message` subtype or a `bot_id` field).
    pub fn has_bot_marker(&self) -> bool {
        self.subtype.as_deref() == Some(BOT_MESSAGE_SUBTYPE) || self.bot_id.is_some()
    }
}
