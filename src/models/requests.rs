//! Request DTOs for the server API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::models::RawScoreEntry;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl`: Optional TTL in seconds; zero or negative stores an already
///   expired entry
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub ttl: Option<i64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.trim().is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }

    /// TTL as a duration, clamping negative seconds to zero.
    pub fn ttl_duration(&self) -> Option<Duration> {
        self.ttl
            .map(|secs| Duration::from_secs(u64::try_from(secs).unwrap_or(0)))
    }
}

/// Request body for POST /leaderboard
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardRequest {
    pub entries: Vec<RawScoreEntry>,
    /// Rows to return (server default if absent)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Only rank attempts made during the current UTC day
    #[serde(default)]
    pub today: bool,
}
