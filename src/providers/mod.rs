//! External Providers
//!
//! The search and completion capabilities the orchestrators call on a cache
//! miss. Each capability is a trait so tests can count and fail calls.

mod groq;
mod tavily;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::SearchResult;

pub use groq::{GroqClient, DEFAULT_GROQ_MODEL, DEFAULT_GROQ_URL};
pub use tavily::{TavilyClient, DEFAULT_TAVILY_URL};

/// A query for the search provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    /// Only results from these domains are returned
    pub include_domains: Vec<String>,
    pub max_results: u32,
}

/// A single-turn completion request. Replies are always requested in JSON mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
}

/// Web search capability.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs a search, failing with [`crate::error::AppError::Fetch`] on transport or status errors.
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult>;
}

/// LLM completion capability.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the raw reply text of the first choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Builds the shared reqwest client used by both providers.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
