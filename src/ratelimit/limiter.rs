//! Windowed request counter keyed by client identity.

use std::collections::HashMap;
use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue};
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::RateWindow;
use crate::error::{AppError, Result};

const LIMIT_HEADER: &str = "ratelimit-limit";
const REMAINING_HEADER: &str = "ratelimit-remaining";
const RESET_HEADER: &str = "ratelimit-reset";

/// Budget left after an admitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub limit: u32,
    pub remaining: u32,
    pub reset_after: Duration,
}

impl RateDecision {
    /// Writes `RateLimit-*` headers unless an inner limiter already did.
    pub fn apply_headers(&self, headers: &mut HeaderMap) {
        if headers.contains_key(LIMIT_HEADER) {
            return;
        }
        headers.insert(LIMIT_HEADER, HeaderValue::from(self.limit));
        headers.insert(REMAINING_HEADER, HeaderValue::from(self.remaining));
        headers.insert(RESET_HEADER, HeaderValue::from(ceil_secs(self.reset_after)));
    }
}

/// Admits at most `max_requests` per client per window.
///
/// A client's window opens with its first request and resets once the window
/// length has passed. Rejected requests are not counted.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    message: String,
    windows: Mutex<HashMap<String, RateWindow>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration, message: impl Into<String>) -> Self {
        Self {
            max_requests,
            window,
            message: message.into(),
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Limiter whose rejection message names the window length.
    pub fn with_default_message(max_requests: u32, window: Duration) -> Self {
        let message = format!(
            "Too many requests from this IP, please try again after {}",
            describe_window(window)
        );
        Self::new(max_requests, window, message)
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Counts a request from `client`, or rejects it if the budget is spent.
    pub async fn check(&self, client: &str) -> Result<RateDecision> {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let window = windows
            .entry(client.to_string())
            .or_insert_with(|| RateWindow::new(now));

        if window.is_elapsed(now, self.window) {
            *window = RateWindow::new(now);
        }

        let reset_after = window.reset_after(now, self.window);
        if window.count >= self.max_requests {
            return Err(AppError::RateLimited {
                message: self.message.clone(),
                retry_after: reset_after,
            });
        }

        window.count += 1;
        Ok(RateDecision {
            limit: self.max_requests,
            remaining: self.max_requests - window.count,
            reset_after,
        })
    }

    /// Drops windows that have already elapsed. Returns how many were removed.
    pub async fn purge_stale(&self) -> usize {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, w| !w.is_elapsed(now, self.window));
        before - windows.len()
    }

    pub async fn tracked_clients(&self) -> usize {
        self.windows.lock().await.len()
    }
}

fn ceil_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

fn describe_window(window: Duration) -> String {
    let secs = window.as_secs();
    match secs {
        3600 => "an hour".to_string(),
        s if s > 3600 && s % 3600 == 0 => format!("{} hours", s / 3600),
        s if s >= 60 && s % 60 == 0 => format!("{} minutes", s / 60),
        s => format!("{} seconds", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    const FIFTEEN_MINUTES: Duration = Duration::from_secs(15 * 60);

    #[tokio::test(start_paused = true)]
    async fn test_rejects_request_over_budget() {
        let limiter = RateLimiter::with_default_message(100, FIFTEEN_MINUTES);

        for _ in 0..100 {
            assert_ok!(limiter.check("10.0.0.1").await);
        }

        match limiter.check("10.0.0.1").await {
            Err(AppError::RateLimited { message, retry_after }) => {
                assert!(message.contains("15 minutes"));
                assert_eq!(retry_after, FIFTEEN_MINUTES);
            }
            other => panic!("expected rate limit, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_resets_after_gap() {
        let limiter = RateLimiter::with_default_message(100, FIFTEEN_MINUTES);

        assert_ok!(limiter.check("10.0.0.1").await);
        for _ in 0..99 {
            tokio::time::advance(Duration::from_secs(1)).await;
            assert_ok!(limiter.check("10.0.0.1").await);
        }

        // Request 101 arrives more than 15 minutes after request 1
        tokio::time::advance(FIFTEEN_MINUTES).await;
        let decision = assert_ok!(limiter.check("10.0.0.1").await);
        assert_eq!(decision.remaining, 99);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clients_are_independent() {
        let limiter = RateLimiter::with_default_message(2, FIFTEEN_MINUTES);

        assert_ok!(limiter.check("a").await);
        assert_ok!(limiter.check("a").await);
        assert_err!(limiter.check("a").await);

        assert_ok!(limiter.check("b").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_does_not_consume_budget() {
        let limiter = RateLimiter::with_default_message(1, Duration::from_secs(60));

        assert_ok!(limiter.check("a").await);
        for _ in 0..5 {
            assert_err!(limiter.check("a").await);
        }

        tokio::time::advance(Duration::from_secs(60)).await;
        let decision = assert_ok!(limiter.check("a").await);
        assert_eq!(decision.remaining, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_counts_down() {
        let limiter = RateLimiter::with_default_message(1, Duration::from_secs(60));

        assert_ok!(limiter.check("a").await);
        tokio::time::advance(Duration::from_secs(20)).await;

        match limiter.check("a").await {
            Err(AppError::RateLimited { retry_after, .. }) => {
                assert_eq!(retry_after, Duration::from_secs(40));
            }
            other => panic!("expected rate limit, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_stale() {
        let limiter = RateLimiter::with_default_message(10, Duration::from_secs(60));

        assert_ok!(limiter.check("old").await);
        tokio::time::advance(Duration::from_secs(45)).await;
        assert_ok!(limiter.check("new").await);
        tokio::time::advance(Duration::from_secs(15)).await;

        assert_eq!(limiter.purge_stale().await, 1);
        assert_eq!(limiter.tracked_clients().await, 1);
    }

    #[test]
    fn test_apply_headers_keeps_inner_values() {
        let inner = RateDecision {
            limit: 100,
            remaining: 7,
            reset_after: Duration::from_millis(1500),
        };
        let outer = RateDecision {
            limit: 100,
            remaining: 50,
            reset_after: Duration::from_secs(10),
        };

        let mut headers = HeaderMap::new();
        inner.apply_headers(&mut headers);
        outer.apply_headers(&mut headers);

        assert_eq!(headers["ratelimit-remaining"], "7");
        assert_eq!(headers["ratelimit-reset"], "2");
    }

    #[test]
    fn test_describe_window() {
        assert_eq!(describe_window(Duration::from_secs(900)), "15 minutes");
        assert_eq!(describe_window(Duration::from_secs(3600)), "an hour");
        assert_eq!(describe_window(Duration::from_secs(7200)), "2 hours");
        assert_eq!(describe_window(Duration::from_secs(45)), "45 seconds");
    }
}
