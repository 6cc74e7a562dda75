//! # Gambit Framework
//!
//! The classification and routing engine of the Gambit bot dispatcher.
//!
//! This layer turns raw platform events into exactly zero or one callback
//! invocation:
//!
//! 1. The [`classifier`] decides which [`MessageCategory`] an event falls
//!    into and prepares the text patterns are matched against
//!    (mention-stripped for direct mentions).
//! 2. The [`ListenerRegistry`] holds the registered [`Listener`]s in
//!    registration order — the sole source of dispatch priority.
//! 3. The [`Dispatcher`] walks the registry in order and invokes the first
//!    listener whose accepted categories include the message's category and
//!    whose patterns match. First match wins; scanning stops there.
//! 4. The [`Replier`] threads replies under the originating message when a
//!    thread anchor is present.
//! 5. The [`EventBoundary`] wraps the whole pass so no per-event failure —
//!    a failed channel lookup, a callback error — can escape to the process
//!    level.
//!
//! [`MessageCategory`]: gambit_core::MessageCategory

pub mod boundary;
pub mod classifier;
pub mod dispatcher;
pub mod error;
pub mod listener;
pub mod registry;
pub mod reply;

pub use boundary::{DEFAULT_APOLOGY, EventBoundary};
pub use classifier::classify;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::{DispatchError, DispatchResult, RegistryError, RegistryResult};
pub use listener::{Action, CommandFn, LeagueCommandFn, Listener, ListenerBuilder, Transform};
pub use registry::ListenerRegistry;
pub use reply::Replier;
