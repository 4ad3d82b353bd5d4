//! Per-client request window.

use std::time::Duration;

use tokio::time::Instant;

/// Requests counted for one client since `window_start`.
#[derive(Debug, Clone, Copy)]
pub struct RateWindow {
    pub window_start: Instant,
    pub count: u32,
}

impl RateWindow {
    /// Opens an empty window at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            count: 0,
        }
    }

    /// True once `now - window_start >= window`.
    pub fn is_elapsed(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) >= window
    }

    /// Time left until this window resets.
    pub fn reset_after(&self, now: Instant, window: Duration) -> Duration {
        (self.window_start + window).saturating_duration_since(now)
    }
}
