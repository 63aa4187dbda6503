//! API Handlers
//!
//! HTTP request handlers for the cache and reducer endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::cache::{shared, CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, GetResponse, HasResponse, HealthResponse, LeaderboardRequest,
    RawServiceRecord, ScoreEntry, ServiceRecord, SetRequest, SetResponse, StatsResponse,
    SweepResponse,
};
use crate::reduce::{self, DEFAULT_LEADERBOARD_LIMIT};

/// Application state shared across all handlers.
///
/// Owns the one cache instance for the process; the sweep task receives a
/// clone of the same handle.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache<Value>,
    /// Leaderboard rows returned when a request gives no limit
    pub leaderboard_limit: usize,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore<Value>) -> Self {
        Self {
            cache: shared(cache),
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            cache: shared(CacheStore::new(config.default_ttl())),
            leaderboard_limit: config.leaderboard_limit,
        }
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl_duration();
    state.cache.write().await.set(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Takes the write lock because an expired entry is evicted on read.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state.cache.write().await.get(&key);

    match value {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(AppError::NotFound(key)),
    }
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<HasResponse> {
    let exists = state.cache.write().await.has(&key);
    Json(HasResponse { key, exists })
}

/// Handler for DELETE /del/:key
///
/// Deleting a missing key is not an error.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let removed = state.cache.write().await.delete(&key);
    Json(DeleteResponse { key, removed })
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.write().await.clear();
    debug!(cleared, "cache cleared");
    Json(ClearResponse { cleared })
}

/// Handler for POST /sweep
///
/// Runs the same pass as the background task, on demand.
pub async fn sweep_handler(State(state): State<AppState>) -> Json<SweepResponse> {
    let removed = state.cache.write().await.sweep();
    Json(SweepResponse { removed })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for POST /services/dedupe
pub async fn dedupe_handler(Json(raw): Json<Vec<RawServiceRecord>>) -> Json<Vec<ServiceRecord>> {
    Json(reduce::dedupe_raw(raw))
}

/// Handler for POST /leaderboard
///
/// Adapts raw score documents, optionally narrows them to today, ranks the
/// best attempt per actor and returns the top `limit` rows.
pub async fn leaderboard_handler(
    State(state): State<AppState>,
    Json(req): Json<LeaderboardRequest>,
) -> Json<Vec<ScoreEntry>> {
    let mut entries: Vec<ScoreEntry> = req.entries.into_iter().map(ScoreEntry::from).collect();

    if req.today {
        let (start, end) = reduce::today_window(Utc::now());
        entries = reduce::within_window(&entries, start, end);
    }

    let limit = req.limit.unwrap_or(state.leaderboard_limit);
    let mut board = reduce::leaderboard(&entries);
    board.truncate(limit);

    Json(board)
}
