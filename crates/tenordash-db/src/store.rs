//! The document store the rankings are read from.
//!
//! A store hands out one [`DocumentHandle`] per query. Handles are never
//! shared between requests; whoever opens one closes it.

use async_trait::async_trait;
use tenordash_core::RawRankingRecord;

use crate::error::StoreError;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Opens a handle scoped to a single per-user database.
    async fn open(&self, database: &str) -> Result<Box<dyn DocumentHandle>, StoreError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait DocumentHandle: Send {
    /// Every document in `collection`, ordered by identifier ascending.
    ///
    /// A collection that does not exist reads as empty.
    async fn find_all(&mut self, collection: &str) -> Result<Vec<RawRankingRecord>, StoreError>;

    /// Releases the underlying connection.
    async fn close(self: Box<Self>) -> Result<(), StoreError>;
}
