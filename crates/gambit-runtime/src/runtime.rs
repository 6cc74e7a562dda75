//! The Gambit event loop.
//!
//! [`GambitRuntime`] owns the listener registry and configuration, wires up
//! the dispatch pipeline, and drains an inbound event queue until shutdown.
//! Each event is handled on its own task so a slow callback never stalls
//! the queue.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use gambit_core::{
    ChannelInfo, ChannelResolver, InboundEvent, LeagueResolver, MessageCategory, MessageSender,
};
use gambit_framework::{Dispatcher, EventBoundary, Listener, ListenerRegistry};

use crate::config::{GambitConfig, LeagueConfig, validate_config};
use crate::error::RuntimeResult;

/// Inbound events buffered before the loop applies backpressure.
const EVENT_QUEUE_DEPTH: usize = 64;

/// Maps channels to leagues from the `[[leagues]]` configuration sections.
#[derive(Debug, Default)]
pub struct LeagueTable {
    by_channel: HashMap<String, String>,
}

impl LeagueTable {
    /// Builds the table from configured league mappings.
    pub fn from_config(leagues: &[LeagueConfig]) -> Self {
        let mut by_channel = HashMap::new();
        for league in leagues {
            for channel in &league.channels {
                by_channel.insert(channel.clone(), league.name.clone());
            }
        }
        Self { by_channel }
    }
}

impl LeagueResolver for LeagueTable {
    fn league_for(&self, channel: &ChannelInfo) -> Option<String> {
        let name = channel.name.as_ref()?;
        self.by_channel.get(name).cloned()
    }
}

/// Owns the dispatch pipeline and the inbound event queue.
///
/// # Example
///
/// ```rust,ignore
/// let mut runtime = GambitRuntime::new(config, resolver, sender);
/// runtime.hears(source_listener()?);
///
/// let events = runtime.events();
/// tokio::spawn(transport_loop(events));
///
/// runtime.run().await?;
/// ```
pub struct GambitRuntime {
    config: GambitConfig,
    registry: ListenerRegistry,
    resolver: Arc<dyn ChannelResolver>,
    sender: Arc<dyn MessageSender>,
    events_tx: mpsc::Sender<InboundEvent>,
    events_rx: mpsc::Receiver<InboundEvent>,
    shutdown: CancellationToken,
}

impl GambitRuntime {
    /// Creates a runtime around a channel resolver and a message sender.
    pub fn new(
        config: GambitConfig,
        resolver: Arc<dyn ChannelResolver>,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        Self {
            config,
            registry: ListenerRegistry::new(),
            resolver,
            sender,
            events_tx,
            events_rx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Registers a listener. Listeners are consulted in registration order.
    pub fn hears(&mut self, listener: Listener) {
        self.registry.register(listener);
    }

    /// Returns a handle the transport uses to feed inbound events.
    pub fn events(&self) -> mpsc::Sender<InboundEvent> {
        self.events_tx.clone()
    }

    /// Returns a token that stops the event loop when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Runs the event loop until shutdown is requested, Ctrl+C arrives, or
    /// every event sender is dropped.
    pub async fn run(self) -> RuntimeResult<()> {
        validate_config(&self.config)?;

        let Self {
            config,
            registry,
            resolver,
            sender,
            events_tx,
            mut events_rx,
            shutdown,
        } = self;
        // Drop our queue handle so the loop ends once the transport's
        // senders are gone.
        drop(events_tx);

        let listener_count = registry.len();
        for category in [
            MessageCategory::DirectMention,
            MessageCategory::DirectMessage,
            MessageCategory::BotRelayed,
            MessageCategory::Ambient,
        ] {
            if !registry.accepts(category) {
                debug!(category = %category, "No listener registered for this category");
            }
        }

        let leagues = Arc::new(LeagueTable::from_config(&config.leagues));
        let dispatcher =
            Dispatcher::new(Arc::new(registry)).with_league_resolver(leagues);
        let boundary = Arc::new(
            EventBoundary::new(resolver, sender, dispatcher, config.bot.bot_id.clone())
                .with_apology(config.bot.apology_text.clone()),
        );

        info!(
            bot_id = %config.bot.bot_id,
            listeners = listener_count,
            "Gambit runtime started"
        );

        let ctrl_c = signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Shutdown requested, stopping event loop");
                    break;
                }
                _ = &mut ctrl_c => {
                    info!("Received Ctrl+C, shutting down");
                    break;
                }
                maybe_event = events_rx.recv() => match maybe_event {
                    Some(event) => {
                        debug!(channel = %event.channel_id, "Event received");
                        let boundary = Arc::clone(&boundary);
                        tokio::spawn(async move {
                            boundary.handle(event).await;
                        });
                    }
                    None => {
                        info!("Event queue closed, stopping event loop");
                        break;
                    }
                },
            }
        }

        info!("Gambit runtime stopped");
        Ok(())
    }
}
