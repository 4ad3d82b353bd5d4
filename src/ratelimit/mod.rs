//! Rate Limiting Module
//!
//! Per-client request budgets. The router stacks two tiers: a global limiter
//! on every route and a stricter one on the AI-backed routes. Rejections
//! happen before any handler runs, so they never reach the cache.

mod limiter;
mod middleware;
mod window;

pub use limiter::{RateDecision, RateLimiter};
pub use middleware::{client_identity, enforce_rate_limit};
pub use window::RateWindow;

// == Public Constants ==
/// Global budget: requests per window
pub const GLOBAL_MAX_REQUESTS: u32 = 100;
/// Global window length in seconds
pub const GLOBAL_WINDOW_SECS: u64 = 15 * 60;
/// AI-route budget: requests per window
pub const AI_MAX_REQUESTS: u32 = 100;
/// AI-route window length in seconds
pub const AI_WINDOW_SECS: u64 = 60 * 60;
