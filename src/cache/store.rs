//! Cache Store Module
//!
//! Main cache engine: HashMap storage with lazy TTL expiration on reads and
//! an explicit sweep for entries that are never read again.

use std::collections::HashMap;
use std::time::Duration;

use tracing::trace;

use crate::cache::{CacheEntry, CacheStats, DEFAULT_TTL};

// == Cache Store ==
/// Key-value store with per-entry expiration.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store with the given default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
        }
    }

    /// Returns the TTL used by `set` when none is given.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Set ==
    /// Stores a value, overwriting any existing entry for `key`.
    ///
    /// Overwriting resets the entry's store time and TTL.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional lifetime (uses the default TTL if None)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key.into(), CacheEntry::new(value, ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value for `key` if present and live.
    ///
    /// An expired entry is evicted as a side effect and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        if self.evict_if_expired(key) {
            self.stats.record_miss();
            return None;
        }

        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Has ==
    /// Same expiry check as `get`, without cloning the value.
    pub fn has(&mut self, key: &str) -> bool {
        if self.evict_if_expired(key) {
            return false;
        }
        self.entries.contains_key(key)
    }

    // == Delete ==
    /// Removes the entry for `key`. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    /// Empties the store. Returns the number of entries dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Sweep ==
    /// Removes every expired entry. Returns the number of entries removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - self.entries.len();

        self.stats.record_sweep();
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes `key` if its entry has expired. Returns true if it did.
    fn evict_if_expired(&mut self, key: &str) -> bool {
        let expired = self
            .entries
            .get(key)
            .map(|entry| entry.is_expired())
            .unwrap_or(false);

        if expired {
            trace!(key, "evicting expired entry");
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        expired
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
