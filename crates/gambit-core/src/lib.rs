//! # Gambit Core
//!
//! Foundation types for the Gambit bot dispatcher.
//!
//! This crate defines the message model that flows through the dispatch
//! pipeline, plus the traits for the external collaborators the core
//! depends on but does not implement:
//!
//! - **Event model**: [`InboundEvent`], [`Delivery`], [`MessageCategory`]
//! - **Channel metadata**: [`ChannelInfo`] and the [`ChannelResolver`]
//!   lookup collaborator
//! - **Message lifecycle**: [`ClassifiedMessage`] (ephemeral, one dispatch
//!   pass) and [`CommandMessage`] (handed to exactly one callback)
//! - **Outbound side**: [`OutboundMessage`] and the [`MessageSender`] send
//!   primitive
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────────┐     ┌──────────────────┐     ┌────────────┐
//! │ Transport │────▶│ ChannelResolver  │────▶│ Classifier │──▶ Dispatcher
//! │ (opaque)  │     │ (collaborator)   │     │            │
//! └───────────┘     └──────────────────┘     └────────────┘
//! ```
//!
//! The transport, the channel lookup, and the send primitive are all
//! platform details. Gambit only sees the traits defined here; the engine
//! itself lives in `gambit-framework`.

pub mod channel;
pub mod error;
pub mod event;
pub mod message;
pub mod outbound;

pub use channel::{ChannelInfo, ChannelResolver, LeagueResolver};
pub use error::{SendError, SendResult};
pub use event::{Delivery, InboundEvent, MessageCategory};
pub use message::{ClassifiedMessage, CommandMessage, mention_token};
pub use outbound::{MessageSender, OutboundMessage};
