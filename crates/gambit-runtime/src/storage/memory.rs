//! In-memory datastore implementation.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::trace;

use super::{Datastore, PlayerRating, StoreError, StoreResult, Subscription};

/// A process-local [`Datastore`]. All state is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ratings: RwLock<HashMap<String, PlayerRating>>,
    subscriptions: RwLock<HashSet<Subscription>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the store. Always succeeds immediately; exists so callers can
    /// go through [`super::connect`] uniformly.
    pub async fn open() -> StoreResult<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn rating(&self, username: &str) -> StoreResult<Option<PlayerRating>> {
        Ok(self.ratings.read().get(&username.to_lowercase()).cloned())
    }

    async fn upsert_rating(&self, rating: PlayerRating) -> StoreResult<()> {
        trace!(username = %rating.username, rating = ?rating.rating, "upserting rating");
        self.ratings
            .write()
            .insert(rating.username.to_lowercase(), rating);
        Ok(())
    }

    async fn subscriptions_for(&self, target: &str) -> StoreResult<Vec<Subscription>> {
        Ok(self
            .subscriptions
            .read()
            .iter()
            .filter(|s| s.target == target)
            .cloned()
            .collect())
    }

    async fn add_subscription(&self, subscription: Subscription) -> StoreResult<()> {
        if !self.subscriptions.write().insert(subscription) {
            return Err(StoreError::Duplicate);
        }
        Ok(())
    }
}
