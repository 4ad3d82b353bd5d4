//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cached payload with its TTL metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// When the entry was stored
    pub stored_at: Instant,
    /// How long the entry stays visible after `stored_at`
    pub ttl: Duration,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    ///
    /// # Arguments
    /// * `value` - The payload to store
    /// * `ttl` - Time-to-live measured from now
    pub fn new(value: Value, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is visible only while `now < stored_at + ttl`,
    /// so it is expired from the instant the TTL has fully elapsed.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against an explicit point in time.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.stored_at + self.ttl
    }
}
