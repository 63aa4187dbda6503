//! Cache Module
//!
//! Provides short-lived in-memory memoization with per-entry TTL, lazy
//! expiration on reads and periodic sweeping.

mod entry;
mod read_through;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use entry::CacheEntry;
pub use read_through::{cache_key, read_through, read_through_or_default, shared, SharedCache};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// TTL used when a value is stored without one
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Interval between background sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);
