//! Gambit Runtime - Orchestration layer for the Gambit bot dispatcher.
//!
//! This crate provides everything around the dispatch engine that a running
//! bot needs:
//!
//! - Configuration loading and validation (`config`)
//! - Logging setup (`logging`)
//! - The datastore collaborator and its in-memory implementation (`storage`)
//! - The event loop (`GambitRuntime`)
//!
//! # Example
//!
//! ```ignore
//! use gambit_runtime::{GambitRuntime, config::ConfigLoader, logging};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().load()?;
//!     logging::init_from_config(&config.logging);
//!
//!     let mut runtime = GambitRuntime::new(config, resolver, sender);
//!     runtime.hears(source_listener()?);
//!
//!     // The (out-of-scope) platform transport feeds events here.
//!     let events = runtime.events();
//!
//!     // Runs until the channel closes or Ctrl+C.
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod storage;

pub use config::{ConfigLoader, GambitConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use runtime::{GambitRuntime, LeagueTable};
pub use storage::{Datastore, MemoryStore, PlayerRating, StoreError, StoreResult, Subscription};
