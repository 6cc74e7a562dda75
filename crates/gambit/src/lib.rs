//! # Gambit
//!
//! A message classification and command dispatch framework for chess league
//! chat bots.
//!
//! ## Overview
//!
//! Gambit turns a stream of raw chat events into command invocations. Every
//! inbound event is classified into exactly one category (direct mention,
//! direct message, bot-relayed, or ambient), matched against listeners in
//! registration order, and the first listener that wants the category and
//! matches a pattern handles it.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐    ┌───────────────┐    ┌────────────┐    ┌────────────┐
//! │ Transport │───▶│ EventBoundary │───▶│ Classifier │───▶│ Dispatcher │──▶ callback
//! │  (yours)  │    │ (per-event    │    │ (category, │    │ (first     │
//! └───────────┘    │  containment) │    │  stripping)│    │  match)    │
//!                  └───────────────┘    └────────────┘    └────────────┘
//! ```
//!
//! - **gambit-core**: events, channels, messages, outbound types
//! - **gambit-framework**: classifier, listener registry, dispatch engine
//! - **gambit-runtime**: configuration, logging, storage, the event loop
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gambit::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().load()?;
//!     logging::init_from_config(&config.logging);
//!
//!     let mut runtime = GambitRuntime::new(config, resolver, sender);
//!     runtime.hears(
//!         Listener::builder()
//!             .pattern(r"^source$")
//!             .categories([MessageCategory::DirectMention, MessageCategory::DirectMessage])
//!             .command(|_msg, replier| async move {
//!                 replier.say("https://github.com/lichess4545/gambit").await;
//!                 Ok(())
//!             })?,
//!     );
//!
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```

pub use gambit_core as core;
pub use gambit_framework as framework;
pub use gambit_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use gambit::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use gambit_runtime::{ConfigLoader, GambitConfig, GambitRuntime, LeagueTable, logging};

    // Storage collaborator
    pub use gambit_runtime::{Datastore, MemoryStore, PlayerRating, Subscription};

    // Listener registration and dispatch
    pub use gambit_framework::{
        DEFAULT_APOLOGY, Dispatcher, EventBoundary, Listener, ListenerBuilder, ListenerRegistry,
        Replier, classify,
    };

    // Core event and channel types
    pub use gambit_core::{
        ChannelInfo, ChannelResolver, ClassifiedMessage, CommandMessage, Delivery, InboundEvent,
        LeagueResolver, MessageCategory, MessageSender, OutboundMessage, mention_token,
    };
}
