//! Cache Store Module
//!
//! TTL key-value store for provider payloads. Expiry is checked lazily on
//! read and swept actively by the cleanup task.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

/// Cache store shared between the orchestrators, handlers and cleanup task.
pub type SharedCache = Arc<RwLock<CacheStore>>;

// == Cache Store ==
/// In-memory payload cache with per-entry TTL.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup statistics
    stats: CacheStats,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL for entries stored without an explicit one
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
        }
    }

    /// Wraps a new store for sharing across tasks.
    pub fn shared(default_ttl: Duration) -> SharedCache {
        Arc::new(RwLock::new(Self::new(default_ttl)))
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Set ==
    /// Stores a payload under `key`.
    ///
    /// Overwrites any existing entry and restarts its TTL clock.
    pub fn set(&mut self, key: String, value: Value, ttl: Option<Duration>) {
        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a payload by key.
    ///
    /// Returns `None` if the key is absent or expired. Expired entries are
    /// removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        self.stats.record_miss();
        None
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        self.stats.set_total_entries(self.entries.len());
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
