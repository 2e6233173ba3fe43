//! Postgres-backed document store.
//!
//! Each per-user database is a Postgres schema and each collection a table of
//! `(id BIGSERIAL, doc JSONB)`. A connection is opened per handle and closed
//! with it; nothing is pooled across requests.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};
use tenordash_core::RawRankingRecord;

use crate::error::StoreError;
use crate::store::{DocumentHandle, DocumentStore};

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    options: PgConnectOptions,
    connect_timeout: Duration,
}

impl PgDocumentStore {
    /// Builds a store from a `postgres://` URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUrl`] if the URL cannot be parsed.
    pub fn new(database_url: &str, connect_timeout_secs: u64) -> Result<Self, StoreError> {
        let options = PgConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        Ok(Self::from_options(options, connect_timeout_secs))
    }

    #[must_use]
    pub fn from_options(options: PgConnectOptions, connect_timeout_secs: u64) -> Self {
        Self {
            options,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        }
    }

    async fn connect(&self) -> Result<PgConnection, StoreError> {
        tokio::time::timeout(self.connect_timeout, PgConnection::connect_with(&self.options))
            .await
            .map_err(|_| StoreError::ConnectTimeout {
                secs: self.connect_timeout.as_secs(),
            })?
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn open(&self, database: &str) -> Result<Box<dyn DocumentHandle>, StoreError> {
        let conn = self.connect().await?;
        Ok(Box::new(PgDocumentHandle {
            conn,
            schema: database.to_string(),
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&mut conn)
            .await;
        conn.close().await?;
        result?;
        Ok(())
    }
}

struct PgDocumentHandle {
    conn: PgConnection,
    schema: String,
}

#[async_trait]
impl DocumentHandle for PgDocumentHandle {
    async fn find_all(&mut self, collection: &str) -> Result<Vec<RawRankingRecord>, StoreError> {
        let table = format!("{}.{}", quote_ident(&self.schema), quote_ident(collection));

        let exists: Option<String> = sqlx::query_scalar("SELECT to_regclass($1)::text")
            .bind(&table)
            .fetch_one(&mut self.conn)
            .await?;
        if exists.is_none() {
            tracing::debug!(table = %table, "collection does not exist; reading as empty");
            return Ok(Vec::new());
        }

        let sql = format!("SELECT id, doc FROM {table} ORDER BY id ASC");
        let rows: Vec<(i64, Value)> = sqlx::query_as(&sql).fetch_all(&mut self.conn).await?;

        Ok(rows
            .into_iter()
            .map(|(id, doc)| with_row_id(doc, id))
            .collect())
    }

    async fn close(self: Box<Self>) -> Result<(), StoreError> {
        self.conn.close().await?;
        Ok(())
    }
}

/// Double-quotes a Postgres identifier, doubling embedded quotes.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Documents without an identifier of their own take the row id.
fn with_row_id(mut doc: Value, id: i64) -> Value {
    if let Value::Object(map) = &mut doc {
        if !map.contains_key("id") && !map.contains_key("_id") {
            map.insert("_id".to_string(), Value::from(id));
        }
    }
    doc
}
