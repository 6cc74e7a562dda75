//! League Bot Example
//!
//! A small chess-league bot built on the Gambit framework. It registers the
//! classic league commands (`source`, `commands`, `ping channel`,
//! `rating <player>`), then feeds itself a short scripted conversation so
//! the whole pipeline can be watched without a chat platform attached:
//! the channel resolver and message sender here are stand-ins for a real
//! transport.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package league-bot
//! ```

mod commands;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use gambit::prelude::*;
use gambit::runtime::config::{BotSettings, LeagueConfig};
use gambit::runtime::logging;

const BOT_ID: &str = "UGAMBIT";

/// Resolves the two channels this demo knows about.
struct DemoResolver;

#[async_trait]
impl ChannelResolver for DemoResolver {
    async fn resolve(&self, channel_id: &str) -> Option<ChannelInfo> {
        match channel_id {
            "C45" => Some(ChannelInfo::named("C45", "team-scheduling")),
            "D01" => Some(ChannelInfo::direct_message("D01")),
            _ => None,
        }
    }
}

/// Prints outbound messages instead of delivering them anywhere.
struct ConsoleSender;

#[async_trait]
impl MessageSender for ConsoleSender {
    async fn send(&self, message: OutboundMessage) -> gambit::core::SendResult<()> {
        match &message.thread_anchor {
            Some(anchor) => info!(
                channel = %message.channel_id,
                thread = %anchor,
                "bot replies: {}",
                message.text
            ),
            None => info!(channel = %message.channel_id, "bot says: {}", message.text),
        }
        Ok(())
    }
}

fn demo_config() -> GambitConfig {
    GambitConfig {
        bot: BotSettings {
            bot_id: BOT_ID.into(),
            ..Default::default()
        },
        leagues: vec![LeagueConfig {
            name: "team4545".into(),
            channels: vec!["team-scheduling".into()],
        }],
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = demo_config();
    logging::init_from_config(&config.logging);

    let store = Arc::new(MemoryStore::new());
    store
        .upsert_rating(PlayerRating::new("cynosure", Some(1923)))
        .await?;

    let mut runtime = GambitRuntime::new(config, Arc::new(DemoResolver), Arc::new(ConsoleSender));
    runtime.hears(commands::source()?);
    runtime.hears(commands::commands()?);
    runtime.hears(commands::ping_channel()?);
    runtime.hears(commands::rating(store)?);

    let events = runtime.events();
    let shutdown = runtime.shutdown_token();

    tokio::spawn(async move {
        let token = mention_token(BOT_ID);
        let script = [
            // A mention in a league channel.
            InboundEvent::mention("C45", "U100", format!("{token} rating cynosure"), "1.0"),
            // The same command over DM; no league applies there.
            InboundEvent::message("D01", "U100", "rating cynosure", "2.0"),
            // Help over DM.
            InboundEvent::message("D01", "U100", "help", "3.0"),
            // Channel ping, mention-only.
            InboundEvent::mention("C45", "U200", format!("{token} ping channel"), "4.0"),
            // Ambient chatter that matches nothing.
            InboundEvent::message("C45", "U200", "good luck with your games!", "5.0"),
        ];

        for event in script {
            let _ = events.send(event).await;
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        // Give the last event a moment to finish, then stop the loop.
        tokio::time::sleep(Duration::from_millis(200)).await;
        shutdown.cancel();
    });

    runtime.run().await?;
    Ok(())
}
