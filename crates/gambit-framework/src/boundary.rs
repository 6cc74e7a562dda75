//! The event-ingestion boundary.
//!
//! Everything between the transport and the dispatch engine happens inside
//! [`EventBoundary::handle`], and nothing that goes wrong inside one event
//! is allowed out: a failed channel lookup drops the event with a warning,
//! a failed callback is logged and answered with a fixed apology, and an
//! unmatched message is simply silence. One bad event can never take the
//! dispatcher down.

use std::sync::Arc;

use tracing::{debug, error, trace, warn};

use gambit_core::{ChannelResolver, InboundEvent, MessageSender};

use crate::classifier::classify;
use crate::dispatcher::{DispatchOutcome, Dispatcher};
use crate::error::DispatchError;
use crate::reply::Replier;

/// Reply sent when a listener callback fails.
pub const DEFAULT_APOLOGY: &str =
    "Something went wrong while handling that command. Sorry about that!";

/// Wires channel resolution, classification, and dispatch together for one
/// event at a time, containing every per-event failure.
pub struct EventBoundary {
    resolver: Arc<dyn ChannelResolver>,
    sender: Arc<dyn MessageSender>,
    dispatcher: Dispatcher,
    bot_id: String,
    apology: String,
}

impl EventBoundary {
    /// Creates a boundary for the bot identified by `bot_id`.
    pub fn new(
        resolver: Arc<dyn ChannelResolver>,
        sender: Arc<dyn MessageSender>,
        dispatcher: Dispatcher,
        bot_id: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            sender,
            dispatcher,
            bot_id: bot_id.into(),
            apology: DEFAULT_APOLOGY.to_string(),
        }
    }

    /// Overrides the apology text sent on callback failure.
    pub fn with_apology(mut self, apology: impl Into<String>) -> Self {
        self.apology = apology.into();
        self
    }

    /// Handles one inbound event to completion. Never returns an error and
    /// never panics on malformed input — failures end inside this call.
    pub async fn handle(&self, event: InboundEvent) {
        let Some(channel) = self.resolver.resolve(&event.channel_id).await else {
            warn!(channel = %event.channel_id, "unable to resolve channel, dropping event");
            return;
        };

        let classified = classify(&event, channel, &self.bot_id);
        let replier = Replier::new(
            Arc::clone(&self.sender),
            classified.channel.id.clone(),
            classified.ts.clone(),
        );

        match self.dispatcher.dispatch(&classified, &replier).await {
            Ok(DispatchOutcome::Handled) => {
                debug!(category = %classified.category, "event handled");
            }
            Ok(DispatchOutcome::NoMatch) => {
                trace!(category = %classified.category, "event did not match any listener");
            }
            Err(DispatchError::Callback(e)) => {
                error!(
                    category = %classified.category,
                    error = ?e,
                    "listener callback failed"
                );
                replier.say(self.apology.clone()).await;
            }
        }
    }
}

impl std::fmt::Debug for EventBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBoundary")
            .field("bot_id", &self.bot_id)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use gambit_core::{ChannelInfo, MessageCategory, OutboundMessage, SendResult};

    use crate::listener::Listener;
    use crate::registry::ListenerRegistry;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<OutboundMessage>>,
    }

    #[async_trait]
    impl MessageSender for RecordingSender {
        async fn send(&self, message: OutboundMessage) -> SendResult<()> {
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }

    struct StaticResolver {
        known: Option<ChannelInfo>,
    }

    #[async_trait]
    impl ChannelResolver for StaticResolver {
        async fn resolve(&self, _channel_id: &str) -> Option<ChannelInfo> {
            self.known.clone()
        }
    }

    fn boundary_with(
        known: Option<ChannelInfo>,
        registry: ListenerRegistry,
    ) -> (Arc<RecordingSender>, EventBoundary) {
        let sender = Arc::new(RecordingSender::default());
        let boundary = EventBoundary::new(
            Arc::new(StaticResolver { known }),
            Arc::clone(&sender) as _,
            Dispatcher::new(Arc::new(registry)),
            "UGAMBIT",
        );
        (sender, boundary)
    }

    #[tokio::test]
    async fn resolution_failure_drops_event_silently() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_cb = Arc::clone(&hits);

        let mut registry = ListenerRegistry::new();
        registry.register(
            Listener::builder()
                .pattern(".*")
                .category(MessageCategory::Ambient)
                .command(move |_, _| {
                    let hits = Arc::clone(&hits_cb);
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }
                })
                .unwrap(),
        );

        let (sender, boundary) = boundary_with(None, registry);
        boundary
            .handle(InboundEvent::message("C404", "U1", "hello", "1.0"))
            .await;

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn callback_failure_sends_one_threaded_apology() {
        let mut registry = ListenerRegistry::new();
        registry.register(
            Listener::builder()
                .pattern("^pairing$")
                .categories([MessageCategory::Ambient, MessageCategory::DirectMention])
                .command(|_, _| async { anyhow::bail!("backend offline") })
                .unwrap(),
        );

        let (sender, boundary) = boundary_with(Some(ChannelInfo::named("C1", "general")), registry);
        boundary
            .handle(InboundEvent::message("C1", "U1", "pairing", "7.7"))
            .await;

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].text, DEFAULT_APOLOGY);
        assert_eq!(sent[0].thread_anchor.as_deref(), Some("7.7"));
    }

    #[tokio::test]
    async fn events_after_a_failure_are_still_processed() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_cb = Arc::clone(&hits);

        let mut registry = ListenerRegistry::new();
        registry.register(
            Listener::builder()
                .pattern("^boom$")
                .category(MessageCategory::Ambient)
                .command(|_, _| async { anyhow::bail!("exploded") })
                .unwrap(),
        );
        registry.register(
            Listener::builder()
                .pattern("^ping$")
                .category(MessageCategory::Ambient)
                .command(move |_, replier| {
                    let hits = Arc::clone(&hits_cb);
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        replier.say("pong").await;
                        Ok(())
                    }
                })
                .unwrap(),
        );

        let (sender, boundary) = boundary_with(Some(ChannelInfo::named("C1", "general")), registry);

        boundary
            .handle(InboundEvent::message("C1", "U1", "boom", "1.0"))
            .await;
        boundary
            .handle(InboundEvent::message("C1", "U1", "ping", "2.0"))
            .await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 2); // apology + pong
        assert_eq!(sent[1].text, "pong");
    }

    #[tokio::test]
    async fn mention_event_is_stripped_and_dispatched() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = Arc::clone(&seen);

        let mut registry = ListenerRegistry::new();
        registry.register(
            Listener::builder()
                .pattern("^source$")
                .category(MessageCategory::DirectMention)
                .command(move |msg, _| {
                    let seen = Arc::clone(&seen_cb);
                    async move {
                        seen.lock().unwrap().push(msg.text);
                        Ok(())
                    }
                })
                .unwrap(),
        );

        let (_, boundary) = boundary_with(Some(ChannelInfo::named("C1", "general")), registry);
        boundary
            .handle(InboundEvent::mention("C1", "U1", "<@UGAMBIT> source", "3.0"))
            .await;

        assert_eq!(seen.lock().unwrap()[0], "source");
    }
}
