//! The listener registry.

use tracing::debug;

use gambit_core::MessageCategory;

use crate::listener::Listener;

/// An ordered, append-only collection of listeners.
///
/// Registration order is the sole source of dispatch priority: when two
/// listeners could both match a message, the first-registered one wins.
/// The registry is populated during startup and then shared read-only
/// (typically behind an `Arc`) — no lock is needed on the dispatch path
/// because no mutation happens concurrently with reads.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener. Order is significant and preserved.
    pub fn register(&mut self, listener: Listener) {
        debug!(
            listener = listener.name().unwrap_or("unnamed"),
            position = self.listeners.len(),
            "registered listener"
        );
        self.listeners.push(listener);
    }

    /// Iterates the listeners in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Listener> {
        self.listeners.iter()
    }

    /// Returns the number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Returns whether any listener reacts to `category`.
    pub fn accepts(&self, category: MessageCategory) -> bool {
        self.listeners.iter().any(|l| l.wants(category))
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}
