pub mod error;
pub mod memory;
pub mod postgres;
pub mod service;
pub mod store;

pub use error::{QueryError, StoreError};
pub use memory::{FailurePoint, MemoryStore};
pub use postgres::PgDocumentStore;
pub use service::{get_user_rankings, RankingQuery, UserRankings};
pub use store::{DocumentHandle, DocumentStore};
