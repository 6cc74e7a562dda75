//! The dispatch engine.
//!
//! [`Dispatcher::dispatch`] takes one classified message and walks the
//! listener registry in registration order:
//!
//! 1. Listeners whose accepted categories do not include the message's
//!    category are skipped without evaluating any pattern.
//! 2. For a wanted listener, patterns are tried in order against the
//!    message's text-for-matching. On the first match, a [`CommandMessage`]
//!    is built (trimmed text plus capture groups), folded through the
//!    listener's transforms, and the callback is invoked exactly once —
//!    then scanning stops entirely, even if later listeners could match.
//! 3. When the registry is exhausted without a match, nothing happens:
//!    unmatched ambient chatter is silence, not an error.
//!
//! Each call is a fresh pass over the full registry; the engine holds no
//! state between invocations, so concurrent per-event tasks are safe.

use std::sync::Arc;

use tracing::{debug, trace};

use gambit_core::{ClassifiedMessage, CommandMessage, LeagueResolver};

use crate::error::{DispatchError, DispatchResult};
use crate::listener::Action;
use crate::registry::ListenerRegistry;
use crate::reply::Replier;

/// Terminal result of one dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A listener matched and its callback ran.
    Handled,
    /// No listener/pattern combination applied; nothing was invoked.
    NoMatch,
}

/// The routing engine over an immutable listener registry.
pub struct Dispatcher {
    registry: Arc<ListenerRegistry>,
    leagues: Option<Arc<dyn LeagueResolver>>,
}

impl Dispatcher {
    /// Creates a dispatcher over `registry`.
    pub fn new(registry: Arc<ListenerRegistry>) -> Self {
        Self {
            registry,
            leagues: None,
        }
    }

    /// Attaches the league lookup used by league commands.
    pub fn with_league_resolver(mut self, leagues: Arc<dyn LeagueResolver>) -> Self {
        self.leagues = Some(leagues);
        self
    }

    /// Runs one dispatch pass, invoking at most one callback.
    ///
    /// A callback error is returned as [`DispatchError::Callback`] for the
    /// ingestion boundary to contain; the scan still stopped at that
    /// listener.
    pub async fn dispatch(
        &self,
        message: &ClassifiedMessage,
        replier: &Replier,
    ) -> DispatchResult<DispatchOutcome> {
        for listener in self.registry.iter() {
            if !listener.wants(message.category) {
                continue;
            }

            let Some(matches) = listener.match_text(&message.text) else {
                continue;
            };

            debug!(
                listener = listener.name().unwrap_or("unnamed"),
                category = %message.category,
                "listener matched, invoking callback"
            );

            let command = CommandMessage {
                sender: message.sender.clone(),
                channel: message.channel.clone(),
                text: message.text.trim().to_string(),
                ts: message.ts.clone(),
                matches,
            };
            let command = listener.apply_transforms(command);

            match listener.action() {
                Action::Command(callback) => callback(command, replier.clone())
                    .await
                    .map_err(DispatchError::Callback)?,
                Action::LeagueCommand(callback) => {
                    let league = self
                        .leagues
                        .as_ref()
                        .and_then(|r| r.league_for(&message.channel));
                    callback(command, league, replier.clone())
                        .await
                        .map_err(DispatchError::Callback)?;
                }
            }

            return Ok(DispatchOutcome::Handled);
        }

        trace!(category = %message.category, "no listener matched");
        Ok(DispatchOutcome::NoMatch)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("has_league_resolver", &self.leagues.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use gambit_core::{
        ChannelInfo, MessageCategory, MessageSender, OutboundMessage, SendResult,
    };

    use crate::listener::Listener;

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

    fn replier() -> (Arc<RecordingSender>, Replier) {
        let sender = Arc::new(RecordingSender::default());
        let replier = Replier::new(Arc::clone(&sender) as _, "C1", None);
        (sender, replier)
    }

    fn classified(category: MessageCategory, text: &str) -> ClassifiedMessage {
        ClassifiedMessage {
            category,
            text: text.to_string(),
            sender: "U1".to_string(),
            channel: ChannelInfo::named("C1", "general"),
            ts: Some("1.0".to_string()),
        }
    }

    fn counting(name: &str, pattern: &str, category: MessageCategory, hits: &Arc<AtomicUsize>) -> Listener {
        let hits = Arc::clone(hits);
        Listener::builder()
            .name(name)
            .pattern(pattern)
            .category(category)
            .command(move |_, _| {
                let hits = Arc::clone(&hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .unwrap()
    }

    #[tokio::test]
    async fn first_registered_listener_wins() {
        let hits = Arc::new(AtomicUsize::new(0));
        let first = Arc::new(AtomicUsize::new(0));

        let mut registry = ListenerRegistry::new();
        registry.register(counting("first", "^help$", MessageCategory::Ambient, &first));
        registry.register(counting("second", "^help$", MessageCategory::Ambient, &hits));

        let dispatcher = Dispatcher::new(Arc::new(registry));
        let (_, replier) = replier();

        let outcome = dispatcher
            .dispatch(&classified(MessageCategory::Ambient, "help"), &replier)
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unwanted_category_skips_pattern_evaluation() {
        let hits = Arc::new(AtomicUsize::new(0));

        let mut registry = ListenerRegistry::new();
        registry.register(counting(
            "mention-only",
            "^ping channel$",
            MessageCategory::DirectMention,
            &hits,
        ));

        let dispatcher = Dispatcher::new(Arc::new(registry));
        let (_, replier) = replier();

        // Same text, but ambient — the pattern would match, the category gate must not let it.
        let outcome = dispatcher
            .dispatch(&classified(MessageCategory::Ambient, "ping channel"), &replier)
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::NoMatch);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn callback_receives_capture_groups() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = Arc::clone(&seen);

        let mut registry = ListenerRegistry::new();
        registry.register(
            Listener::builder()
                .pattern(r"^rating (\S+)$")
                .category(MessageCategory::DirectMention)
                .command(move |msg, _| {
                    let seen = Arc::clone(&seen_cb);
                    async move {
                        seen.lock().unwrap().push(msg.matches.clone());
                        Ok(())
                    }
                })
                .unwrap(),
        );

        let dispatcher = Dispatcher::new(Arc::new(registry));
        let (_, replier) = replier();

        dispatcher
            .dispatch(
                &classified(MessageCategory::DirectMention, "rating carlsen"),
                &replier,
            )
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0][0].as_deref(), Some("rating carlsen"));
        assert_eq!(seen[0][1].as_deref(), Some("carlsen"));
    }

    #[tokio::test]
    async fn direct_message_source_scenario() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = Arc::clone(&seen);

        let mut registry = ListenerRegistry::new();
        registry.register(
            Listener::builder()
                .name("source")
                .pattern("^source$")
                .categories([MessageCategory::DirectMention, MessageCategory::DirectMessage])
                .command(move |msg, _| {
                    let seen = Arc::clone(&seen_cb);
                    async move {
                        seen.lock().unwrap().push(msg);
                        Ok(())
                    }
                })
                .unwrap(),
        );

        let dispatcher = Dispatcher::new(Arc::new(registry));
        let (_, replier) = replier();

        let outcome = dispatcher
            .dispatch(&classified(MessageCategory::DirectMessage, "Source"), &replier)
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Handled);
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].group(0), Some("Source"));
    }

    #[tokio::test]
    async fn command_text_is_trimmed_before_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = Arc::clone(&seen);

        let mut registry = ListenerRegistry::new();
        registry.register(
            Listener::builder()
                .pattern("pairings")
                .category(MessageCategory::Ambient)
                .command(move |msg, _| {
                    let seen = Arc::clone(&seen_cb);
                    async move {
                        seen.lock().unwrap().push(msg.text);
                        Ok(())
                    }
                })
                .unwrap(),
        );

        let dispatcher = Dispatcher::new(Arc::new(registry));
        let (_, replier) = replier();

        dispatcher
            .dispatch(&classified(MessageCategory::Ambient, "  pairings  "), &replier)
            .await
            .unwrap();

        assert_eq!(seen.lock().unwrap()[0], "pairings");
    }

    #[tokio::test]
    async fn transforms_apply_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = Arc::clone(&seen);

        let mut registry = ListenerRegistry::new();
        registry.register(
            Listener::builder()
                .pattern("^echo$")
                .category(MessageCategory::Ambient)
                .transform(|mut msg| {
                    msg.text.push_str("-a");
                    msg
                })
                .transform(|mut msg| {
                    msg.text.push_str("-b");
                    msg
                })
                .command(move |msg, _| {
                    let seen = Arc::clone(&seen_cb);
                    async move {
                        seen.lock().unwrap().push(msg.text);
                        Ok(())
                    }
                })
                .unwrap(),
        );

        let dispatcher = Dispatcher::new(Arc::new(registry));
        let (_, replier) = replier();

        dispatcher
            .dispatch(&classified(MessageCategory::Ambient, "echo"), &replier)
            .await
            .unwrap();

        assert_eq!(seen.lock().unwrap()[0], "echo-a-b");
    }

    #[tokio::test]
    async fn league_command_receives_resolved_league() {
        struct StaticLeagues;
        impl LeagueResolver for StaticLeagues {
            fn league_for(&self, channel: &ChannelInfo) -> Option<String> {
                (channel.name.as_deref() == Some("general")).then(|| "team4545".to_string())
            }
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = Arc::clone(&seen);

        let mut registry = ListenerRegistry::new();
        registry.register(
            Listener::builder()
                .pattern("^standings$")
                .category(MessageCategory::Ambient)
                .league_command(move |_, league, _| {
                    let seen = Arc::clone(&seen_cb);
                    async move {
                        seen.lock().unwrap().push(league);
                        Ok(())
                    }
                })
                .unwrap(),
        );

        let dispatcher =
            Dispatcher::new(Arc::new(registry)).with_league_resolver(Arc::new(StaticLeagues));
        let (_, replier) = replier();

        dispatcher
            .dispatch(&classified(MessageCategory::Ambient, "standings"), &replier)
            .await
            .unwrap();

        assert_eq!(
            seen.lock().unwrap()[0],
            Some("team4545".to_string())
        );
    }

    #[tokio::test]
    async fn no_match_is_silent() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = ListenerRegistry::new();
        registry.register(counting("ping", "^ping$", MessageCategory::Ambient, &hits));

        let dispatcher = Dispatcher::new(Arc::new(registry));
        let (sender, replier) = replier();

        let outcome = dispatcher
            .dispatch(&classified(MessageCategory::Ambient, "pong"), &replier)
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::NoMatch);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn callback_error_is_surfaced_after_one_invocation() {
        let later = Arc::new(AtomicUsize::new(0));

        let mut registry = ListenerRegistry::new();
        registry.register(
            Listener::builder()
                .name("faulty")
                .pattern("^boom$")
                .category(MessageCategory::Ambient)
                .command(|_, _| async { anyhow::bail!("exploded") })
                .unwrap(),
        );
        registry.register(counting("after", "^boom$", MessageCategory::Ambient, &later));

        let dispatcher = Dispatcher::new(Arc::new(registry));
        let (_, replier) = replier();

        let result = dispatcher
            .dispatch(&classified(MessageCategory::Ambient, "boom"), &replier)
            .await;

        assert!(matches!(result, Err(DispatchError::Callback(_))));
        // The scan stopped at the failing listener.
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }
}
