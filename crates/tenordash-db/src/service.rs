//! The ranking query: one user's documents, normalized and summarised.

use tenordash_core::{
    database_name, normalize_ranking_at, today_dmy, AppConfig, CanonicalRanking, StatsSummary,
    UsernameKey,
};

use crate::error::QueryError;
use crate::store::DocumentStore;

/// Where a user's rankings live inside the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingQuery {
    pub database_prefix: String,
    pub collection: String,
}

impl Default for RankingQuery {
    fn default() -> Self {
        Self {
            database_prefix: "tenor_database".to_string(),
            collection: "gif_rankings".to_string(),
        }
    }
}

impl RankingQuery {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            database_prefix: config.database_prefix.clone(),
            collection: config.rankings_collection.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRankings {
    pub username: UsernameKey,
    pub rankings: Vec<CanonicalRanking>,
    pub stats: StatsSummary,
}

/// Loads and normalizes every ranking for `username`.
///
/// The store handle is opened for this call only and is closed before
/// returning whether or not the read succeeded. A failed close after a
/// successful read is logged and otherwise ignored.
///
/// # Errors
///
/// - [`QueryError::InvalidInput`] if `username` is blank once any profile URL
///   prefix is stripped. The store is not touched.
/// - [`QueryError::Upstream`] if the store cannot be opened or read.
pub async fn get_user_rankings<S>(
    store: &S,
    query: &RankingQuery,
    username: &str,
) -> Result<UserRankings, QueryError>
where
    S: DocumentStore + ?Sized,
{
    let username = UsernameKey::parse(username)?;
    let database = database_name(&query.database_prefix, &username);

    let mut handle = store.open(&database).await.inspect_err(|e| {
        tracing::error!(database = %database, error = %e, "failed to open document store");
    })?;

    let fetched = handle.find_all(&query.collection).await;

    if let Err(e) = handle.close().await {
        tracing::warn!(database = %database, error = %e, "failed to close document store handle");
    }

    let raw = fetched.inspect_err(|e| {
        tracing::error!(database = %database, error = %e, "ranking query failed");
    })?;

    let today = today_dmy();
    let rankings: Vec<CanonicalRanking> = raw
        .iter()
        .map(|doc| normalize_ranking_at(doc, &today))
        .collect();
    let stats = StatsSummary::from_rankings(&rankings);

    tracing::info!(
        username = %username,
        database = %database,
        count = rankings.len(),
        "loaded user rankings"
    );

    Ok(UserRankings {
        username,
        rankings,
        stats,
    })
}
