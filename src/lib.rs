//! Mind Mentor - study resource curation and study plan backend
//!
//! Proxies resource searches and LLM completions behind a TTL cache and
//! per-client rate limits.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod ratelimit;
pub mod service;
pub mod storage;
pub mod tasks;
pub mod validation;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{AppError, Result};
pub use service::StudyService;
pub use tasks::spawn_cleanup_task;
