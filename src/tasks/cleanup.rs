//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries and
//! elapsed rate-limit windows.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;
use crate::ratelimit::RateLimiter;

/// Spawns a background task that periodically sweeps expired state.
///
/// Reads already skip expired entries, so the sweep only bounds memory held
/// by keys nobody asks for again.
///
/// # Arguments
/// * `cache` - Shared cache store
/// * `limiters` - Rate limiters whose stale client windows should be dropped
/// * `cleanup_interval_secs` - Interval in seconds between runs (minimum 1)
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: SharedCache,
    limiters: Vec<Arc<RateLimiter>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();

            let mut purged = 0;
            for limiter in &limiters {
                purged += limiter.purge_stale().await;
            }

            if removed > 0 || purged > 0 {
                info!(
                    "Cleanup: removed {} expired cache entries, {} stale rate windows",
                    removed, purged
                );
            } else {
                debug!("Cleanup: nothing to remove");
            }
        }
    })
}
