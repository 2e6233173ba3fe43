//! Normalization from stored ranking documents to [`CanonicalRanking`].
//!
//! The ranking collections were written by several generations of the
//! tracker, each with its own field names. Every accepted spelling lives in
//! [`FIELD_ALIASES`]; a newly observed variant is a one-line addition there.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::rankings::{CanonicalRanking, RawRankingRecord};

/// Rank emitted when a document carries no usable rank under any alias.
pub const NOT_FOUND_RANK: &str = "#NOT_FOUND";

const DMY: &str = "%d-%m-%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    GifUrl,
    SearchTerm,
    UpdatedRank,
    FilterKeyword,
    LastUpdated,
}

/// Canonical field → accepted source keys, canonical name first.
const FIELD_ALIASES: [(Field, &[&str]); 6] = [
    (Field::Id, &["id", "_id", "gif_id"]),
    (Field::GifUrl, &["gif_url", "url", "gifUrl"]),
    (Field::SearchTerm, &["search_term", "searchTerm", "term", "query"]),
    (
        Field::UpdatedRank,
        &["updated_rank", "current_rank", "rank", "position"],
    ),
    (
        Field::FilterKeyword,
        &["filter_keyword", "filterKeyword", "keyword", "filter"],
    ),
    (
        Field::LastUpdated,
        &["last_updated", "lastUpdated", "updated_at"],
    ),
];

fn aliases(field: Field) -> &'static [&'static str] {
    FIELD_ALIASES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, keys)| *keys)
        .unwrap_or_default()
}

/// Today's local date as `DD-MM-YYYY`.
#[must_use]
pub fn today_dmy() -> String {
    chrono::Local::now().format(DMY).to_string()
}

/// Normalizes a stored document, stamping today's date where none was stored.
#[must_use]
pub fn normalize_ranking(raw: &RawRankingRecord) -> CanonicalRanking {
    normalize_ranking_at(raw, &today_dmy())
}

/// Normalizes a stored document using `fallback_date` for missing dates.
///
/// Never fails: a non-object document, or one with none of the known keys,
/// yields empty strings and [`NOT_FOUND_RANK`].
#[must_use]
pub fn normalize_ranking_at(raw: &RawRankingRecord, fallback_date: &str) -> CanonicalRanking {
    let empty = Map::new();
    let doc = raw.as_object().unwrap_or(&empty);

    CanonicalRanking {
        id: resolve(doc, Field::Id, identifier).unwrap_or_default(),
        gif_url: resolve(doc, Field::GifUrl, text).unwrap_or_default(),
        search_term: resolve(doc, Field::SearchTerm, text).unwrap_or_default(),
        updated_rank: resolve(doc, Field::UpdatedRank, rank)
            .unwrap_or_else(|| NOT_FOUND_RANK.to_string()),
        filter_keyword: resolve(doc, Field::FilterKeyword, text).unwrap_or_default(),
        last_updated: resolve(doc, Field::LastUpdated, date)
            .unwrap_or_else(|| fallback_date.to_string()),
    }
}

/// First alias of `field` whose value `convert` accepts.
fn resolve(
    doc: &Map<String, Value>,
    field: Field,
    convert: fn(&Value) -> Option<String>,
) -> Option<String> {
    aliases(field)
        .iter()
        .filter_map(|key| doc.get(*key))
        .filter(|value| is_present(value))
        .find_map(convert)
}

/// `null` and blank strings are treated as missing.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        // Extended-JSON ObjectId.
        Value::Object(map) => Some(
            map.get("$oid")
                .and_then(Value::as_str)
                .map_or_else(|| value.to_string(), str::to_string),
        ),
        // Anything else is kept as compact JSON.
        other => Some(other.to_string()),
    }
}

/// Stored dates are `DD-MM-YYYY` strings, epoch millis, or extended-JSON
/// `$date` wrappers around either an RFC 3339 string or millis.
fn date(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => n.as_i64().and_then(dmy_from_millis),
        Value::Object(map) => match map.get("$date")? {
            Value::String(s) => Some(
                DateTime::parse_from_rfc3339(s.trim())
                    .map_or_else(|_| s.trim().to_string(), |d| d.format(DMY).to_string()),
            ),
            Value::Number(n) => n.as_i64().and_then(dmy_from_millis),
            Value::Object(inner) => inner
                .get("$numberLong")
                .and_then(Value::as_str)
                .and_then(|raw| raw.trim().parse().ok())
                .and_then(dmy_from_millis),
            _ => None,
        },
        _ => None,
    }
}

fn dmy_from_millis(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|d| d.format(DMY).to_string())
}

fn rank(value: &Value) -> Option<String> {
    let digits = match value {
        Value::Number(n) => render_number(n),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    if digits.starts_with('#') {
        Some(digits)
    } else {
        Some(format!("#{digits}"))
    }
}

/// Renders integral floats without a fractional part (`5.0` → `5`).
#[allow(clippy::cast_possible_truncation)]
fn render_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract().abs() < f64::EPSILON && f.abs() < 9.0e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
