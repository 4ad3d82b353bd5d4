//! Study Service
//!
//! The three cached flows behind the API: resource search, resource
//! curation and plan generation. Each derives a key, serves a live cache
//! entry if there is one, and otherwise calls a provider, validates the
//! payload and caches it.
//!
//! The cache lock is only held for the lookup and the store, never while a
//! provider call is in flight. Two concurrent misses on one key both reach
//! the provider and the later `set` wins.

pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, warn};

use crate::cache::{derive_key, CacheOperation, SharedCache};
use crate::error::{AppError, Result};
use crate::models::{CuratedResourceSet, SearchResult, StudyPlan};
use crate::providers::{
    CompletionProvider, CompletionRequest, SearchProvider, SearchQuery,
};
use crate::validation::{parse_completion, validate_plan, validate_resources};

const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

// == Study Service ==
/// Cached orchestration over the search and completion providers.
#[derive(Clone)]
pub struct StudyService {
    cache: SharedCache,
    search: Arc<dyn SearchProvider>,
    completion: Arc<dyn CompletionProvider>,
    ttl: Duration,
}

impl StudyService {
    /// Creates a service caching every payload for `ttl`.
    pub fn new(
        cache: SharedCache,
        search: Arc<dyn SearchProvider>,
        completion: Arc<dyn CompletionProvider>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            search,
            completion,
            ttl,
        }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == Search Flow ==
    /// Searches for learning resources on `subject`.
    ///
    /// Never fails: a provider error is logged and yields an empty, uncached
    /// result, since search output is only context for curation.
    pub async fn search_resources(&self, subject: &str) -> SearchResult {
        let key = derive_key(CacheOperation::Search, subject, None);
        if let Some(hit) = self.cached::<SearchResult>(&key).await {
            debug!(key = %key, "search cache hit");
            return hit;
        }

        let query = SearchQuery {
            text: prompts::search_query(subject),
            include_domains: prompts::LEARNING_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            max_results: prompts::SEARCH_MAX_RESULTS,
        };

        match self.search.search(&query).await {
            Ok(result) => {
                self.store(key, &result).await;
                result
            }
            Err(e) => {
                error!("Search failed for '{}': {}", subject, e);
                SearchResult::empty()
            }
        }
    }

    // == Curation Flow ==
    /// Asks the completion provider to pick exactly five resources.
    ///
    /// Fetch, parse and validation failures all propagate and nothing is cached.
    pub async fn curate_resources(
        &self,
        search: &SearchResult,
        subject: &str,
    ) -> Result<CuratedResourceSet> {
        let key = derive_key(CacheOperation::Resources, subject, None);
        if let Some(hit) = self.cached::<CuratedResourceSet>(&key).await {
            debug!(key = %key, "resources cache hit");
            return Ok(hit);
        }

        let request = CompletionRequest {
            system_prompt: prompts::CURATION_SYSTEM.to_string(),
            user_prompt: prompts::curation_user(subject, search),
            max_tokens: prompts::CURATION_MAX_TOKENS,
        };

        let curated = match self.complete_and_validate(&request, validate_resources).await {
            Ok(curated) => curated,
            Err(e) => {
                error!("Resource curation failed for '{}': {}", subject, e);
                return Err(e);
            }
        };

        self.store(key, &curated).await;
        info!("Curated {} resources for '{}'", curated.resources.len(), subject);
        Ok(curated)
    }

    // == Plan Flow ==
    /// Generates a study plan for `subject` ending on `exam_date`.
    ///
    /// Plans are cached per subject and exam date only, so a cached plan is
    /// handed back with `user_id` rebound to the caller. Persisting the plan
    /// is left to the caller.
    pub async fn generate_plan(
        &self,
        subject: &str,
        user_id: &str,
        exam_date: &str,
    ) -> Result<StudyPlan> {
        let exam = parse_exam_date(exam_date)?;

        let key = derive_key(CacheOperation::Plan, subject, Some(exam_date));
        if let Some(mut plan) = self.cached::<StudyPlan>(&key).await {
            debug!(key = %key, "plan cache hit");
            plan.user_id = user_id.to_string();
            return Ok(plan);
        }

        let now = Utc::now();
        let days = days_until(exam, now);
        if days <= 0 {
            warn!(
                "Exam date {} for '{}' is {} days away; generating anyway",
                exam_date, subject, days
            );
        }

        let request = CompletionRequest {
            system_prompt: prompts::PLAN_SYSTEM.to_string(),
            user_prompt: prompts::plan_user(subject, exam_date, days),
            max_tokens: prompts::PLAN_MAX_TOKENS,
        };

        let generated = match self.complete_and_validate(&request, validate_plan).await {
            Ok(generated) => generated,
            Err(e) => {
                error!("Plan generation failed for '{}': {}", subject, e);
                return Err(e);
            }
        };

        let plan = StudyPlan::new(user_id, generated, now);
        self.store(key, &plan).await;
        info!("Generated {}-week plan for '{}'", plan.weekly_plans.len(), subject);
        Ok(plan)
    }

    async fn complete_and_validate<T, R>(
        &self,
        request: &CompletionRequest,
        validator: fn(&serde_json::Value) -> std::result::Result<T, R>,
    ) -> Result<T>
    where
        AppError: From<R>,
    {
        let reply = self.completion.complete(request).await?;
        let payload = parse_completion(&reply)?;
        Ok(validator(&payload)?)
    }

    /// Reads a live entry; an entry that no longer deserializes counts as a miss.
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.cache.write().await.get(key)?;
        match serde_json::from_value(value) {
            Ok(hit) => Some(hit),
            Err(e) => {
                warn!("Ignoring unreadable cache entry '{}': {}", key, e);
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: String, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => self.cache.write().await.set(key, json, Some(self.ttl)),
            Err(e) => warn!("Not caching '{}': {}", key, e),
        }
    }
}

// == Exam Dates ==
/// Parses `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
pub fn parse_exam_date(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidRequest(format!("Invalid exam date '{}'", input)))
}

/// Whole days from `now` until `exam`, rounded up. Zero or negative for past dates.
pub fn days_until(exam: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (exam - now).num_milliseconds();
    (ms as f64 / MS_PER_DAY).ceil() as i64
}
