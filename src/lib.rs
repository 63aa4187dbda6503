//! Pantry Cache - local data utilities for a delivery marketplace
//!
//! Provides a TTL cache for remote reads, service-listing de-duplication and
//! best-score-per-actor leaderboard ranking, plus an HTTP surface over them.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod reduce;
pub mod snapshot;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::SweepTask;
