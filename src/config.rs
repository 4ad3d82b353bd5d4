//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_TTL_SECS;
use crate::providers::{DEFAULT_GROQ_MODEL, DEFAULT_GROQ_URL, DEFAULT_TAVILY_URL};
use crate::ratelimit::{AI_MAX_REQUESTS, AI_WINDOW_SECS, GLOBAL_MAX_REQUESTS, GLOBAL_WINDOW_SECS};

/// Origins allowed by CORS when `CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://major-karn.vercel.app",
    "https://major-karn.onrender.com",
    "http://localhost:3000",
];

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds for cached provider payloads
    pub cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Requests per client per global window
    pub rate_limit_max: u32,
    /// Global window length in seconds
    pub rate_limit_window: u64,
    /// Requests per client per AI-route window
    pub ai_rate_limit_max: u32,
    /// AI-route window length in seconds
    pub ai_rate_limit_window: u64,
    /// Browser origins allowed by CORS
    pub cors_origins: Vec<String>,
    pub tavily_api_key: Option<String>,
    pub tavily_api_url: String,
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub groq_model: String,
    /// Outbound request timeout in seconds
    pub http_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 5000)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 1800)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `RATE_LIMIT_MAX` / `RATE_LIMIT_WINDOW` - Global budget (default: 100 per 900s)
    /// - `AI_RATE_LIMIT_MAX` / `AI_RATE_LIMIT_WINDOW` - AI-route budget (default: 100 per 3600s)
    /// - `CORS_ORIGINS` - Comma-separated origin list
    /// - `TAVILY_API_KEY`, `TAVILY_API_URL` - Search provider
    /// - `GROQ_API_KEY`, `GROQ_API_URL`, `GROQ_MODEL` - Completion provider
    /// - `HTTP_TIMEOUT_SECS` - Outbound request timeout (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("PORT", defaults.server_port),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            rate_limit_max: env_or("RATE_LIMIT_MAX", defaults.rate_limit_max),
            rate_limit_window: env_or("RATE_LIMIT_WINDOW", defaults.rate_limit_window),
            ai_rate_limit_max: env_or("AI_RATE_LIMIT_MAX", defaults.ai_rate_limit_max),
            ai_rate_limit_window: env_or("AI_RATE_LIMIT_WINDOW", defaults.ai_rate_limit_window),
            cors_origins: env::var("CORS_ORIGINS")
                .ok()
                .map(|v| parse_origins(&v))
                .filter(|origins| !origins.is_empty())
                .unwrap_or(defaults.cors_origins),
            tavily_api_key: non_empty_var("TAVILY_API_KEY"),
            tavily_api_url: non_empty_var("TAVILY_API_URL").unwrap_or(defaults.tavily_api_url),
            groq_api_key: non_empty_var("GROQ_API_KEY"),
            groq_api_url: non_empty_var("GROQ_API_URL").unwrap_or(defaults.groq_api_url),
            groq_model: non_empty_var("GROQ_MODEL").unwrap_or(defaults.groq_model),
            http_timeout: env_or("HTTP_TIMEOUT_SECS", defaults.http_timeout),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window)
    }

    pub fn ai_rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.ai_rate_limit_window)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            cleanup_interval: 60,
            rate_limit_max: GLOBAL_MAX_REQUESTS,
            rate_limit_window: GLOBAL_WINDOW_SECS,
            ai_rate_limit_max: AI_MAX_REQUESTS,
            ai_rate_limit_window: AI_WINDOW_SECS,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            tavily_api_key: None,
            tavily_api_url: DEFAULT_TAVILY_URL.to_string(),
            groq_api_key: None,
            groq_api_url: DEFAULT_GROQ_URL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            http_timeout: 30,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Splits a comma-separated origin list, dropping blanks and trailing slashes.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
