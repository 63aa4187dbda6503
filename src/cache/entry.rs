//! Cache Entry Module
//!
//! Defines a single cached value stamped with its store time and TTL.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was written
    pub stored_at: Instant,
    /// How long the entry stays live after `stored_at`
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Lifetime of the entry; `Duration::ZERO` is already expired
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
            ttl,
        }
    }

    // == Age ==
    /// Time elapsed since the entry was written.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.stored_at)
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once its age is greater than
    /// or equal to its TTL, so a zero TTL is expired on creation.
    pub fn is_expired(&self) -> bool {
        self.age() >= self.ttl
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, saturating at zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.age())
    }
}
