//! Tavily search client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{SearchProvider, SearchQuery};
use crate::error::{AppError, Result};
use crate::models::{SearchHit, SearchResult};

pub const DEFAULT_TAVILY_URL: &str = "https://api.tavily.com";

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: &'static str,
    include_answer: bool,
    max_results: u32,
    include_domains: &'a [String],
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<TavilyHit>,
}

#[derive(Debug, Deserialize)]
struct TavilyHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

impl From<TavilyResponse> for SearchResult {
    fn from(resp: TavilyResponse) -> Self {
        Self {
            answer: resp.answer.unwrap_or_default(),
            results: resp
                .results
                .into_iter()
                .map(|hit| SearchHit {
                    title: hit.title,
                    url: hit.url,
                    snippet: hit.content,
                })
                .collect(),
        }
    }
}

/// Search provider backed by the Tavily REST API.
#[derive(Debug, Clone)]
pub struct TavilyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TavilyClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        let body = TavilyRequest {
            query: &query.text,
            search_depth: "advanced",
            include_answer: true,
            max_results: query.max_results,
            include_domains: &query.include_domains,
        };

        let mut req = self.http.post(format!("{}/search", self.base_url)).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!("Tavily search failed with status {}", status)));
        }

        let parsed: TavilyResponse = resp.json().await?;
        debug!("Tavily returned {} results", parsed.results.len());
        Ok(parsed.into())
    }
}
