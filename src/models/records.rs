//! Domain records and the adapters that build them from raw documents.
//!
//! Documents from the remote store are loosely shaped: fields may be
//! missing or carry the wrong JSON type, the same concept may live under two
//! names, and timestamps arrive as strings, epoch milliseconds or
//! `{seconds, nanoseconds}` objects. All of that is resolved here so the
//! reducers only ever see [`ServiceRecord`] and [`ScoreEntry`]. A malformed
//! field never rejects its document.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Keeps string values; any other JSON type reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// First value that is present and not blank.
fn first_present(preferred: Option<String>, fallback: Option<String>) -> Option<String> {
    preferred
        .filter(|v| !v.trim().is_empty())
        .or(fallback.filter(|v| !v.trim().is_empty()))
}

// == Service Record ==
/// A bookable service as shown in a category listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    pub category_key: String,
}

impl ServiceRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category_key: category_key.into(),
        }
    }
}

/// Service document as stored remotely.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawServiceRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub category_master_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub category_id: Option<String>,
}

/// Where a service's category identifier came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    Primary(String),
    Fallback(String),
    Missing,
}

impl CategoryRef {
    /// Prefers the primary identifier, then the fallback. Blank values count
    /// as absent.
    pub fn resolve(primary: Option<&str>, fallback: Option<&str>) -> Self {
        let present = |s: Option<&str>| s.filter(|v| !v.trim().is_empty()).map(str::to_string);

        match (present(primary), present(fallback)) {
            (Some(p), _) => CategoryRef::Primary(p),
            (None, Some(f)) => CategoryRef::Fallback(f),
            (None, None) => CategoryRef::Missing,
        }
    }

    pub fn into_key(self) -> String {
        match self {
            CategoryRef::Primary(key) | CategoryRef::Fallback(key) => key,
            CategoryRef::Missing => String::new(),
        }
    }
}

impl From<RawServiceRecord> for ServiceRecord {
    fn from(raw: RawServiceRecord) -> Self {
        let category = CategoryRef::resolve(
            raw.category_master_id.as_deref(),
            raw.category_id.as_deref(),
        );
        Self {
            id: raw.id.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            category_key: category.into_key(),
        }
    }
}

// == Score Entry ==
/// One scored attempt by an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub actor_id: String,
    pub display_name: String,
    pub score: f64,
    pub occurred_at: DateTime<Utc>,
}

impl ScoreEntry {
    pub fn new(
        actor_id: impl Into<String>,
        display_name: impl Into<String>,
        score: f64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            display_name: display_name.into(),
            score,
            occurred_at,
        }
    }
}

/// Timestamp as it may appear in a raw document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Rfc3339(DateTime<Utc>),
    Millis(i64),
    /// The document store's native timestamp object
    Seconds {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    Unrecognized(Value),
}

impl RawTimestamp {
    /// Out-of-range or unrecognized values resolve to the Unix epoch.
    pub fn to_utc(&self) -> DateTime<Utc> {
        let resolved = match self {
            RawTimestamp::Rfc3339(at) => Some(*at),
            RawTimestamp::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            RawTimestamp::Seconds {
                seconds,
                nanoseconds,
            } => Utc.timestamp_opt(*seconds, *nanoseconds).single(),
            RawTimestamp::Unrecognized(_) => None,
        };
        resolved.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Score as it may appear in a raw document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScore {
    Number(f64),
    Text(String),
    Other(Value),
}

impl RawScore {
    /// Numeric strings parse; anything else scores zero.
    pub fn to_f64(&self) -> f64 {
        match self {
            RawScore::Number(n) => *n,
            RawScore::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0),
            RawScore::Other(_) => 0.0,
        }
    }
}

/// Score document as stored remotely.
///
/// Each concept may arrive under two names; the first of each pair wins
/// when both are present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawScoreEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub actor_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub user_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub display_name: Option<String>,
    pub score: Option<RawScore>,
    pub created_at: Option<RawTimestamp>,
    pub occurred_at: Option<RawTimestamp>,
}

impl From<RawScoreEntry> for ScoreEntry {
    fn from(raw: RawScoreEntry) -> Self {
        Self {
            actor_id: first_present(raw.user_id, raw.actor_id).unwrap_or_default(),
            display_name: first_present(raw.user_name, raw.display_name).unwrap_or_default(),
            score: raw.score.map(|s| s.to_f64()).unwrap_or(0.0),
            occurred_at: raw
                .created_at
                .or(raw.occurred_at)
                .map(|at| at.to_utc())
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_prefers_primary() {
        let raw: RawServiceRecord = serde_json::from_str(
            r#"{"id":"a","name":"Fan Fitting","categoryMasterId":"cat1","categoryId":"cat9"}"#,
        )
        .unwrap();
        let record = ServiceRecord::from(raw);
        assert_eq!(record.category_key, "cat1");
    }

    #[test]
    fn test_category_falls_back_when_primary_blank() {
        assert_eq!(
            CategoryRef::resolve(Some("  "), Some("cat9")),
            CategoryRef::Fallback("cat9".to_string())
        );
        assert_eq!(CategoryRef::resolve(None, None), CategoryRef::Missing);
    }

    #[test]
    fn test_missing_fields_degrade_to_empty() {
        let raw: RawServiceRecord = serde_json::from_str("{}").unwrap();
        let record = ServiceRecord::from(raw);
        assert_eq!(record, ServiceRecord::new("", "", ""));
    }

    #[test]
    fn test_score_entry_from_raw_with_millis() {
        let raw: RawScoreEntry = serde_json::from_str(
            r#"{"userId":"u1","userName":"Asha","score":12,"createdAt":1700000000000}"#,
        )
        .unwrap();
        let entry = ScoreEntry::from(raw);

        assert_eq!(entry.actor_id, "u1");
        assert_eq!(entry.display_name, "Asha");
        assert_eq!(entry.score, 12.0);
        assert_eq!(entry.occurred_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_score_entry_from_raw_with_alternate_names_and_rfc3339() {
        let raw: RawScoreEntry = serde_json::from_str(
            r#"{"actorId":"u2","displayName":"Ben","score":7.5,"occurredAt":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        let entry = ScoreEntry::from(raw);

        assert_eq!(entry.actor_id, "u2");
        assert_eq!(entry.score, 7.5);
        assert_eq!(entry.occurred_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_score_entry_missing_fields_degrade_to_zero() {
        let raw: RawScoreEntry = serde_json::from_str(r#"{"userId":"u3"}"#).unwrap();
        let entry = ScoreEntry::from(raw);

        assert_eq!(entry.score, 0.0);
        assert_eq!(entry.occurred_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_unrecognized_timestamp_does_not_reject_document() {
        let raw: RawScoreEntry =
            serde_json::from_str(r#"{"userId":"u4","score":3,"createdAt":"yesterday"}"#).unwrap();
        let entry = ScoreEntry::from(raw);

        assert_eq!(entry.score, 3.0);
        assert_eq!(entry.occurred_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_wrong_typed_service_fields_degrade_to_empty() {
        let raw: RawServiceRecord = serde_json::from_str(
            r#"{"id":7,"name":42,"categoryMasterId":["x"],"categoryId":"cat2"}"#,
        )
        .unwrap();
        let record = ServiceRecord::from(raw);

        assert_eq!(record, ServiceRecord::new("", "", "cat2"));
    }

    #[test]
    fn test_wrong_typed_score_fields_degrade() {
        let raw: RawScoreEntry =
            serde_json::from_str(r#"{"userId":7,"userName":null,"score":{"v":1}}"#).unwrap();
        let entry = ScoreEntry::from(raw);

        assert_eq!(entry.actor_id, "");
        assert_eq!(entry.display_name, "");
        assert_eq!(entry.score, 0.0);
    }

    #[test]
    fn test_numeric_string_score_parses() {
        let raw: RawScoreEntry =
            serde_json::from_str(r#"{"userId":"u1","score":" 12 "}"#).unwrap();
        assert_eq!(ScoreEntry::from(raw).score, 12.0);

        let raw: RawScoreEntry =
            serde_json::from_str(r#"{"userId":"u1","score":"twelve"}"#).unwrap();
        assert_eq!(ScoreEntry::from(raw).score, 0.0);
    }

    #[test]
    fn test_both_field_names_present_prefers_first() {
        let raw: RawScoreEntry = serde_json::from_str(
            r#"{"userId":"u1","actorId":"a1","userName":"","displayName":"Asha",
                "score":3,"createdAt":1000,"occurredAt":2000}"#,
        )
        .unwrap();
        let entry = ScoreEntry::from(raw);

        assert_eq!(entry.actor_id, "u1");
        assert_eq!(entry.display_name, "Asha");
        assert_eq!(entry.occurred_at.timestamp_millis(), 1000);
    }

    #[test]
    fn test_store_native_timestamp_object() {
        let raw: RawScoreEntry = serde_json::from_str(
            r#"{"userId":"u1","createdAt":{"seconds":1700000000,"nanoseconds":500000000}}"#,
        )
        .unwrap();
        let entry = ScoreEntry::from(raw);
        assert_eq!(entry.occurred_at.timestamp_millis(), 1_700_000_000_500);

        let raw: RawScoreEntry = serde_json::from_str(
            r#"{"userId":"u1","occurredAt":{"_seconds":1700000001,"_nanoseconds":0}}"#,
        )
        .unwrap();
        let entry = ScoreEntry::from(raw);
        assert_eq!(entry.occurred_at.timestamp(), 1_700_000_001);
    }
}
