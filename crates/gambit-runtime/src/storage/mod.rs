//! The datastore collaborator.
//!
//! Listener callbacks that need persistent state (player ratings, event
//! subscriptions) go through the [`Datastore`] trait. The runtime ships an
//! in-memory implementation ([`MemoryStore`]); a real deployment would back
//! this with a database without the callbacks noticing.

use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::StorageConfig;

pub mod memory;

pub use memory::MemoryStore;

/// A player's cached rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    /// Player username, matched case-insensitively.
    pub username: String,

    /// Last known classical rating, if any.
    pub rating: Option<i32>,

    /// When the rating was last refreshed.
    #[serde(default)]
    pub last_checked_at: Option<SystemTime>,
}

impl PlayerRating {
    /// Creates a rating record checked now.
    pub fn new(username: impl Into<String>, rating: Option<i32>) -> Self {
        Self {
            username: username.into(),
            rating,
            last_checked_at: Some(SystemTime::now()),
        }
    }
}

/// A request to be notified when something happens to someone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscription {
    /// Who asked for the notification.
    pub requester: String,

    /// Whose activity is being watched.
    pub source: String,

    /// The watched event, e.g. "a-game-starts".
    pub event: String,

    /// Where the notification should be delivered.
    pub target: String,

    /// League the subscription is scoped to.
    pub league: String,
}

/// Errors from datastore operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The datastore did not become available in time.
    #[error("datastore connection timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// The record already exists.
    #[error("record already exists")]
    Duplicate,

    /// The datastore backend failed.
    #[error("datastore unavailable: {0}")]
    Unavailable(String),
}

/// Result type for datastore operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent state used by listener callbacks.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Looks up the cached rating for a username.
    async fn rating(&self, username: &str) -> StoreResult<Option<PlayerRating>>;

    /// Inserts or replaces a rating record.
    async fn upsert_rating(&self, rating: PlayerRating) -> StoreResult<()>;

    /// Returns all subscriptions delivered to `target`.
    async fn subscriptions_for(&self, target: &str) -> StoreResult<Vec<Subscription>>;

    /// Records a new subscription. Returns [`StoreError::Duplicate`] if an
    /// identical subscription already exists.
    async fn add_subscription(&self, subscription: Subscription) -> StoreResult<()>;
}

/// Opens a datastore, bounding the wait by the configured connect timeout.
pub async fn connect<S, F>(config: &StorageConfig, open: F) -> StoreResult<S>
where
    S: Datastore,
    F: Future<Output = StoreResult<S>>,
{
    let timeout = config.connect_timeout();
    match tokio::time::timeout(timeout, open).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::ConnectTimeout(timeout)),
    }
}
