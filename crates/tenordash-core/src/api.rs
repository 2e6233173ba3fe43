//! JSON envelope returned by the rankings endpoint.
//!
//! Failures use the same shape as successes, with `success: false`, an
//! `error` message, no rankings and zeroed stats, so clients branch on
//! `success` rather than on the HTTP status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rankings::{CanonicalRanking, StatsSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ResponseMeta {
    #[must_use]
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            username: None,
        }
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingsResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub rankings: Vec<CanonicalRanking>,
    #[serde(default = "StatsSummary::errored")]
    pub stats: StatsSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl RankingsResponse {
    #[must_use]
    pub fn success(rankings: Vec<CanonicalRanking>, stats: StatsSummary, meta: ResponseMeta) -> Self {
        Self {
            success: true,
            error: None,
            rankings,
            stats,
            meta: Some(meta),
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>, meta: ResponseMeta) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            rankings: Vec::new(),
            stats: StatsSummary::errored(),
            meta: Some(meta),
        }
    }
}
