//! Listener definitions.
//!
//! A [`Listener`] is one registered rule: a set of patterns, the message
//! categories it reacts to, an optional chain of transforms, and the
//! callback to invoke on a match. Listeners are built once at startup via
//! [`ListenerBuilder`] and are immutable afterwards.
//!
//! # Callback variants
//!
//! Two kinds of commands exist, expressed as the [`Action`] sum type:
//!
//! - a plain command gets `(CommandMessage, Replier)`;
//! - a league command additionally gets the league resolved for the
//!   originating channel, because its reply depends on which league the
//!   conversation belongs to.
//!
//! The category and pattern logic is identical for both — only the
//! invocation differs.
//!
//! # Example
//!
//! ```rust,ignore
//! let listener = Listener::builder()
//!     .name("source")
//!     .pattern(r"^source$")
//!     .categories([MessageCategory::DirectMention, MessageCategory::DirectMessage])
//!     .command(|_msg, replier| async move {
//!         replier.say("https://github.com/lichess4545/gambit").await;
//!         Ok(())
//!     })?;
//! ```

use std::sync::Arc;

use futures::future::BoxFuture;
use regex::{Regex, RegexBuilder};

use gambit_core::{CommandMessage, MessageCategory};

use crate::error::{RegistryError, RegistryResult};
use crate::reply::Replier;

/// A pure transform applied to a matched command message before the
/// callback runs. Each transform consumes a message and produces the next.
pub type Transform = Arc<dyn Fn(CommandMessage) -> CommandMessage + Send + Sync>;

/// Callback for a plain command.
pub type CommandFn =
    Arc<dyn Fn(CommandMessage, Replier) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Callback for a league command. The second argument is the league
/// resolved for the originating channel, `None` when the channel is not
/// mapped to any league.
pub type LeagueCommandFn = Arc<
    dyn Fn(CommandMessage, Option<String>, Replier) -> BoxFuture<'static, anyhow::Result<()>>
        + Send
        + Sync,
>;

/// The tagged callback of a listener.
#[derive(Clone)]
pub enum Action {
    /// A command that does not depend on league context.
    Command(CommandFn),
    /// A command whose behavior depends on the originating channel's league.
    LeagueCommand(LeagueCommandFn),
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Command(_) => f.write_str("Action::Command"),
            Self::LeagueCommand(_) => f.write_str("Action::LeagueCommand"),
        }
    }
}

/// One registered rule mapping categories and patterns to a callback.
///
/// Immutable once built; the registry only appends.
#[derive(Clone)]
pub struct Listener {
    name: Option<String>,
    patterns: Vec<Regex>,
    categories: Vec<MessageCategory>,
    transforms: Vec<Transform>,
    action: Action,
}

impl Listener {
    /// Starts building a listener.
    pub fn builder() -> ListenerBuilder {
        ListenerBuilder::default()
    }

    /// Returns the listener's name, if one was set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns whether this listener reacts to `category`.
    pub fn wants(&self, category: MessageCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Tries the patterns in declaration order against `text`. Returns the
    /// capture groups of the first pattern that matches (index 0 is the
    /// whole match), or `None` when no pattern applies.
    pub fn match_text(&self, text: &str) -> Option<Vec<Option<String>>> {
        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(text) {
                return Some(
                    caps.iter()
                        .map(|group| group.map(|m| m.as_str().to_string()))
                        .collect(),
                );
            }
        }
        None
    }

    /// Folds the message through the transform chain in order.
    pub fn apply_transforms(&self, message: CommandMessage) -> CommandMessage {
        self.transforms
            .iter()
            .fold(message, |msg, transform| transform(msg))
    }

    /// Returns the callback to invoke on a match.
    pub fn action(&self) -> &Action {
        &self.action
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("name", &self.name)
            .field(
                "patterns",
                &self.patterns.iter().map(Regex::as_str).collect::<Vec<_>>(),
            )
            .field("categories", &self.categories)
            .field("action", &self.action)
            .finish()
    }
}

/// Builder for [`Listener`].
///
/// Finalized by [`command`](Self::command) or
/// [`league_command`](Self::league_command), which validate the invariants:
/// at least one pattern, at least one category, all patterns compile.
/// Patterns are compiled case-insensitively.
#[derive(Default)]
pub struct ListenerBuilder {
    name: Option<String>,
    patterns: Vec<String>,
    categories: Vec<MessageCategory>,
    transforms: Vec<Transform>,
}

impl ListenerBuilder {
    /// Sets a name used in logs.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds one pattern. Patterns are tried in the order they are added.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Adds several patterns at once.
    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds one accepted message category.
    pub fn category(mut self, category: MessageCategory) -> Self {
        self.categories.push(category);
        self
    }

    /// Adds several accepted categories at once.
    pub fn categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = MessageCategory>,
    {
        self.categories.extend(categories);
        self
    }

    /// Appends a transform to the chain.
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(CommandMessage) -> CommandMessage + Send + Sync + 'static,
    {
        self.transforms.push(Arc::new(transform));
        self
    }

    /// Finalizes the listener with a plain command callback.
    pub fn command<F, Fut>(self, callback: F) -> RegistryResult<Listener>
    where
        F: Fn(CommandMessage, Replier) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.finish(Action::Command(Arc::new(move |msg, replier| {
            Box::pin(callback(msg, replier))
        })))
    }

    /// Finalizes the listener with a league command callback.
    pub fn league_command<F, Fut>(self, callback: F) -> RegistryResult<Listener>
    where
        F: Fn(CommandMessage, Option<String>, Replier) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.finish(Action::LeagueCommand(Arc::new(
            move |msg, league, replier| Box::pin(callback(msg, league, replier)),
        )))
    }

    fn finish(self, action: Action) -> RegistryResult<Listener> {
        if self.patterns.is_empty() {
            return Err(RegistryError::EmptyPatterns);
        }
        if self.categories.is_empty() {
            return Err(RegistryError::EmptyCategories);
        }

        let patterns = self
            .patterns
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Listener {
            name: self.name,
            patterns,
            categories: self.categories,
            transforms: self.transforms,
            action,
        })
    }
}
