//! Message classification.
//!
//! Given a raw inbound event, its channel metadata, and the bot's own
//! platform id, [`classify`] decides which single [`MessageCategory`] the
//! event falls into and prepares the text patterns will be matched against.
//!
//! # Category precedence
//!
//! Several of the underlying conditions can hold simultaneously — a bot can
//! post into a DM channel, a DM can contain the bot-mention token. The
//! category is therefore chosen by a fixed precedence order:
//!
//! 1. bot-relayed (the payload carries a bot-origin marker)
//! 2. direct-message (DM channel, not a group)
//! 3. direct-mention (text contains the mention token, or the platform
//!    delivered the event as an explicit mention)
//! 4. ambient (the catch-all)
//!
//! So a bot-originated message in a DM channel classifies as bot-relayed,
//! and a mention inside a DM classifies as direct-message.

use gambit_core::{
    ChannelInfo, ClassifiedMessage, Delivery, InboundEvent, MessageCategory, mention_token,
};

/// Classifies one inbound event.
///
/// Pure and deterministic: the same `(event, channel, bot_id)` triple always
/// yields the same category and text. Never fails — a missing text or
/// sender field is defaulted to empty.
pub fn classify(event: &InboundEvent, channel: ChannelInfo, bot_id: &str) -> ClassifiedMessage {
    let raw = event.text.clone().unwrap_or_default();
    let token = mention_token(bot_id);

    let bot_relayed = event.has_bot_marker();
    let direct_message = channel.is_direct_message && !channel.is_group && !bot_relayed;
    // Explicit mention events are direct mentions by construction; the
    // platform already disambiguated them.
    let direct_mention =
        (event.delivery == Delivery::Mention || raw.contains(&token)) && !bot_relayed;

    let category = if bot_relayed {
        MessageCategory::BotRelayed
    } else if direct_message {
        MessageCategory::DirectMessage
    } else if direct_mention {
        MessageCategory::DirectMention
    } else {
        MessageCategory::Ambient
    };

    // Mention markup is stripped for matching, but whitespace is left
    // untouched until CommandMessage construction.
    let text = if category == MessageCategory::DirectMention {
        strip_mention(&raw, &token)
    } else {
        raw
    };

    ClassifiedMessage {
        category,
        text,
        sender: event.sender.clone().unwrap_or_default(),
        channel,
        ts: event.ts.clone(),
    }
}

/// Removes the first occurrence of the mention token, together with one
/// optional trailing separator (`:` or `,`) and the spaces that follow it.
///
/// Text without the token is returned unchanged — a mention event whose
/// payload omits the markup still matches on its full text.
fn strip_mention(text: &str, token: &str) -> String {
    let Some(start) = text.find(token) else {
        return text.to_string();
    };

    let mut rest = &text[start + token.len()..];
    if let Some(stripped) = rest.strip_prefix(':').or_else(|| rest.strip_prefix(',')) {
        rest = stripped;
    }
    let rest = rest.trim_start_matches(' ');

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..start]);
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: &str = "UGAMBIT";

    fn public_channel() -> ChannelInfo {
        ChannelInfo::named("C1", "general")
    }

    #[test]
    fn mention_token_is_stripped_with_leading_separator() {
        let event = InboundEvent::mention("C1", "U1", format!("{} source", mention_token(BOT)), "1.0");
        let classified = classify(&event, public_channel(), BOT);

        assert_eq!(classified.category, MessageCategory::DirectMention);
        assert_eq!(classified.text, "source");
    }

    #[test]
    fn mention_with_colon_separator_is_stripped() {
        let event = InboundEvent::mention("C1", "U1", format!("{}: ping channel", mention_token(BOT)), "1.0");
        let classified = classify(&event, public_channel(), BOT);
        assert_eq!(classified.text, "ping channel");
    }

    #[test]
    fn mention_mid_text_strips_only_the_token() {
        let event = InboundEvent::message("C1", "U1", format!("hey {} hello", mention_token(BOT)), "1.0");
        let classified = classify(&event, public_channel(), BOT);

        assert_eq!(classified.category, MessageCategory::DirectMention);
        assert_eq!(classified.text, "hey hello");
    }

    #[test]
    fn mention_delivery_is_direct_mention_even_without_token() {
        let event = InboundEvent::mention("C1", "U1", "help", "1.0");
        let classified = classify(&event, public_channel(), BOT);

        assert_eq!(classified.category, MessageCategory::DirectMention);
        assert_eq!(classified.text, "help");
    }

    #[test]
    fn bot_relayed_takes_precedence_over_direct_message() {
        let event = InboundEvent::message("D1", "U1", "standings", "1.0").from_bot("B7");
        let classified = classify(&event, ChannelInfo::direct_message("D1"), BOT);

        assert_eq!(classified.category, MessageCategory::BotRelayed);
    }

    #[test]
    fn direct_message_takes_precedence_over_mention_token() {
        let event = InboundEvent::message("D1", "U1", format!("{} source", mention_token(BOT)), "1.0");
        let classified = classify(&event, ChannelInfo::direct_message("D1"), BOT);

        assert_eq!(classified.category, MessageCategory::DirectMessage);
        // No stripping outside the direct-mention category.
        assert!(classified.text.contains(&mention_token(BOT)));
    }

    #[test]
    fn group_channel_is_not_a_direct_message() {
        let event = InboundEvent::message("G1", "U1", "hello", "1.0");
        let mut channel = ChannelInfo::group("G1", "team-scheduling");
        channel.is_direct_message = true; // group flag wins
        let classified = classify(&event, channel, BOT);

        assert_eq!(classified.category, MessageCategory::Ambient);
    }

    #[test]
    fn plain_channel_message_is_ambient() {
        let event = InboundEvent::message("C1", "U1", "good game", "1.0");
        let classified = classify(&event, public_channel(), BOT);

        assert_eq!(classified.category, MessageCategory::Ambient);
        assert_eq!(classified.text, "good game");
    }

    #[test]
    fn missing_text_and_sender_default_to_empty() {
        let mut event = InboundEvent::message("C1", "U1", "", "1.0");
        event.text = None;
        event.sender = None;
        let classified = classify(&event, public_channel(), BOT);

        assert_eq!(classified.text, "");
        assert_eq!(classified.sender, "");
        assert_eq!(classified.category, MessageCategory::Ambient);
    }

    #[test]
    fn classification_is_deterministic() {
        let event = InboundEvent::mention("C1", "U1", format!("{} rating magnus", mention_token(BOT)), "2.0");
        let a = classify(&event, public_channel(), BOT);
        let b = classify(&event, public_channel(), BOT);

        assert_eq!(a.category, b.category);
        assert_eq!(a.text, b.text);
    }
}
