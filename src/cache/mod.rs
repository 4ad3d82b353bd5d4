//! Cache Module
//!
//! In-memory TTL caching of search results, curated resources and study
//! plans, plus the key derivation that addresses them.

mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{derive_key, CacheOperation, KEY_SEPARATOR};
pub use stats::CacheStats;
pub use store::{CacheStore, SharedCache};

// == Public Constants ==
/// Default TTL for cached provider payloads, in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30 * 60;
