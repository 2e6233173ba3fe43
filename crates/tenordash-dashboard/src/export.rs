//! CSV export of the loaded rankings and stats.
//!
//! Header row is the keys of the first row; every value is written as its
//! JSON encoding (strings quoted, numbers bare) with no further escaping.

use serde::Serialize;
use serde_json::Value;
use tenordash_core::{ProcessingStatus, StatsSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Rankings,
    Stats,
}

impl ExportKind {
    #[must_use]
    pub fn filename(self) -> &'static str {
        match self {
            ExportKind::Rankings => "tenor_rankings.csv",
            ExportKind::Stats => "tenor_stats.csv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: &'static str,
    pub content: String,
}

/// Single row written by the stats export.
#[derive(Debug, Serialize)]
pub(crate) struct StatsExportRow {
    total_gifs: usize,
    pending_gifs: usize,
    completed_gifs: usize,
    last_update: String,
    status: ProcessingStatus,
}

impl From<&StatsSummary> for StatsExportRow {
    fn from(stats: &StatsSummary) -> Self {
        Self {
            total_gifs: stats.total_gifs,
            pending_gifs: stats.pending_gifs,
            completed_gifs: stats.completed_gifs,
            last_update: stats.last_update.clone(),
            status: stats.processing_status,
        }
    }
}

/// Renders `rows` as CSV. Returns an empty string for no rows.
///
/// # Errors
///
/// Returns the `serde_json` error if a row fails to serialize.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String, serde_json::Error> {
    let values = rows
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;

    let Some(first) = values.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&str> = first
        .as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let mut lines = Vec::with_capacity(values.len() + 1);
    lines.push(headers.join(","));
    for value in &values {
        let fields: Vec<String> = headers
            .iter()
            .map(|h| value.get(*h).map(Value::to_string).unwrap_or_default())
            .collect();
        lines.push(fields.join(","));
    }
    Ok(lines.join("\n"))
}
