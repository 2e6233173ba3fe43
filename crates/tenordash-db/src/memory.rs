//! In-process [`DocumentStore`] for tests and local demos.
//!
//! Counts every handle it opens and closes so callers can assert that
//! connections are released, and can be told to fail at a chosen point.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tenordash_core::RawRankingRecord;

use crate::error::StoreError;
use crate::store::{DocumentHandle, DocumentStore};

type Collections = HashMap<String, Vec<RawRankingRecord>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    Open,
    Query,
    Close,
}

#[derive(Debug, Default)]
struct Inner {
    databases: Mutex<HashMap<String, Collections>>,
    failure: Mutex<Option<(FailurePoint, String)>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends documents to `database.collection`, preserving order.
    pub fn insert(&self, database: &str, collection: &str, docs: Vec<RawRankingRecord>) {
        let mut databases = self
            .inner
            .databases
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        databases
            .entry(database.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default()
            .extend(docs);
    }

    /// Makes every subsequent call at `point` fail with `message`.
    pub fn fail_on(&self, point: FailurePoint, message: &str) {
        *self
            .inner
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some((point, message.to_string()));
    }

    #[must_use]
    pub fn opened(&self) -> usize {
        self.inner.opened.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn closed(&self) -> usize {
        self.inner.closed.load(Ordering::SeqCst)
    }

    fn check(inner: &Inner, point: FailurePoint) -> Result<(), StoreError> {
        let failure = inner.failure.lock().unwrap_or_else(PoisonError::into_inner);
        match failure.as_ref() {
            Some((p, message)) if *p == point => Err(StoreError::Unavailable(message.clone())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn open(&self, database: &str) -> Result<Box<dyn DocumentHandle>, StoreError> {
        Self::check(&self.inner, FailurePoint::Open)?;
        self.inner.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryHandle {
            inner: Arc::clone(&self.inner),
            database: database.to_string(),
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Self::check(&self.inner, FailurePoint::Open)
    }
}

struct MemoryHandle {
    inner: Arc<Inner>,
    database: String,
}

#[async_trait]
impl DocumentHandle for MemoryHandle {
    async fn find_all(&mut self, collection: &str) -> Result<Vec<RawRankingRecord>, StoreError> {
        MemoryStore::check(&self.inner, FailurePoint::Query)?;
        let databases = self
            .inner
            .databases
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(databases
            .get(&self.database)
            .and_then(|collections| collections.get(collection))
            .cloned()
            .unwrap_or_default())
    }

    async fn close(self: Box<Self>) -> Result<(), StoreError> {
        self.inner.closed.fetch_add(1, Ordering::SeqCst);
        MemoryStore::check(&self.inner, FailurePoint::Close)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn unknown_database_reads_as_empty() {
        let store = MemoryStore::new();
        let mut handle = store.open("tenor_database_nobody").await.expect("open");
        let docs = handle.find_all("gif_rankings").await.expect("find");
        assert!(docs.is_empty());
        handle.close().await.expect("close");
        assert_eq!((store.opened(), store.closed()), (1, 1));
    }

    #[tokio::test]
    async fn documents_come_back_in_insertion_order() {
        let store = MemoryStore::new();
        store.insert("db", "c", vec![json!({ "_id": 1 }), json!({ "_id": 2 })]);
        store.insert("db", "c", vec![json!({ "_id": 3 })]);
        let mut handle = store.open("db").await.expect("open");
        let docs = handle.find_all("c").await.expect("find");
        let ids: Vec<_> = docs.iter().map(|d| d["_id"].as_i64()).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn open_failure_does_not_count_as_opened() {
        let store = MemoryStore::new();
        store.fail_on(FailurePoint::Open, "connection refused");
        assert!(store.open("db").await.is_err());
        assert!(store.ping().await.is_err());
        assert_eq!(store.opened(), 0);
    }
}
