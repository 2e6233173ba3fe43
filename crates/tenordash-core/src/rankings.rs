//! Ranking records as served to dashboards, plus the summary stats computed
//! over them.

use serde::{Deserialize, Serialize};

/// A ranking document exactly as the store returns it.
///
/// Field names drifted over time, so nothing about its shape is assumed; see
/// [`crate::normalize`] for how it becomes a [`CanonicalRanking`].
pub type RawRankingRecord = serde_json::Value;

/// The stable ranking shape used by the table, chart and CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRanking {
    pub id: String,
    pub gif_url: String,
    pub search_term: String,
    /// Always `#<rank>` or `#NOT_FOUND`.
    pub updated_rank: String,
    pub filter_keyword: String,
    /// `DD-MM-YYYY`.
    pub last_updated: String,
}

impl CanonicalRanking {
    /// Parses `updated_rank` as an integer, ignoring the leading `#`.
    ///
    /// Returns `None` for `#NOT_FOUND` and any other non-numeric rank.
    #[must_use]
    pub fn rank_number(&self) -> Option<i64> {
        let raw = self.updated_rank.trim();
        raw.strip_prefix('#').unwrap_or(raw).trim().parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Waiting,
    Active,
    Error,
}

impl std::fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStatus::Waiting => write!(f, "waiting"),
            ProcessingStatus::Active => write!(f, "active"),
            ProcessingStatus::Error => write!(f, "error"),
        }
    }
}

/// Aggregate counters shown on the dashboard stat cards.
///
/// Counts travel as decimal strings on the wire (`"totalGifs": "3"`) and are
/// accepted back as either strings or numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    #[serde(with = "count_string")]
    pub total_gifs: usize,
    #[serde(with = "count_string")]
    pub pending_gifs: usize,
    #[serde(with = "count_string")]
    pub completed_gifs: usize,
    pub last_update: String,
    pub processing_status: ProcessingStatus,
}

impl StatsSummary {
    /// Stats shown before anything has been requested.
    #[must_use]
    pub fn waiting() -> Self {
        Self {
            total_gifs: 0,
            pending_gifs: 0,
            completed_gifs: 0,
            last_update: String::new(),
            processing_status: ProcessingStatus::Waiting,
        }
    }

    /// Zeroed stats attached to every failed query.
    #[must_use]
    pub fn errored() -> Self {
        Self {
            total_gifs: 0,
            pending_gifs: 0,
            completed_gifs: 0,
            last_update: "N/A".to_string(),
            processing_status: ProcessingStatus::Error,
        }
    }

    /// Summarises a successful read. Nothing is ever pending in the read-only
    /// flow, so every record counts as completed.
    #[must_use]
    pub fn from_rankings(rankings: &[CanonicalRanking]) -> Self {
        let total = rankings.len();
        Self {
            total_gifs: total,
            pending_gifs: 0,
            completed_gifs: total,
            last_update: rankings
                .first()
                .map_or_else(|| "N/A".to_string(), |r| r.last_updated.clone()),
            processing_status: ProcessingStatus::Active,
        }
    }
}

mod count_string {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    // Signature is fixed by `#[serde(with)]`.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub(super) fn serialize<S: Serializer>(value: &usize, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
        // Lenient like the dashboard always was: garbage counts read as zero.
        Ok(match Count::deserialize(deserializer)? {
            Count::Number(n) => usize::try_from(n).unwrap_or(0),
            Count::Text(s) => s.trim().parse().unwrap_or(0),
        })
    }
}
