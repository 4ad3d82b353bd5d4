//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};

use crate::cache::{CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    CurateRequest, CuratedResourceSet, HealthResponse, PlanRequest, StatsResponse,
    StatusResponse, StudyPlan,
};
use crate::providers::{http_client, GroqClient, TavilyClient};
use crate::ratelimit::RateLimiter;
use crate::service::StudyService;
use crate::storage::{InMemoryPlanRepository, PlanRepository};

/// Header carrying the caller's user id when the body omits it.
pub const USER_ID_HEADER: &str = "x-user-id";

/// User id recorded on plans from callers that identify themselves nowhere.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Application state shared across all handlers.
///
/// Everything here is built once at startup and injected, so tests can
/// assemble a fresh state with stub providers.
#[derive(Clone)]
pub struct AppState {
    /// Cached search, curation and plan flows
    pub service: Arc<StudyService>,
    /// Where generated plans are persisted
    pub plans: Arc<dyn PlanRepository>,
    /// Budget applied to every route
    pub global_limiter: Arc<RateLimiter>,
    /// Budget applied to the AI-backed routes, on top of the global one
    pub ai_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(
        service: StudyService,
        plans: Arc<dyn PlanRepository>,
        global_limiter: RateLimiter,
        ai_limiter: RateLimiter,
    ) -> Self {
        Self {
            service: Arc::new(service),
            plans,
            global_limiter: Arc::new(global_limiter),
            ai_limiter: Arc::new(ai_limiter),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires the Tavily and Groq clients, a fresh cache and an in-memory
    /// plan repository. Fails if no Groq API key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let groq_key = config
            .groq_api_key
            .clone()
            .ok_or_else(|| AppError::Internal("GROQ_API_KEY is not set".to_string()))?;

        let http = http_client(config.http_timeout())?;
        let search = TavilyClient::new(
            http.clone(),
            config.tavily_api_url.clone(),
            config.tavily_api_key.clone(),
        );
        let completion = GroqClient::new(
            http,
            config.groq_api_url.clone(),
            groq_key,
            config.groq_model.clone(),
        );

        let cache = CacheStore::shared(config.cache_ttl());
        let service = StudyService::new(
            cache,
            Arc::new(search),
            Arc::new(completion),
            config.cache_ttl(),
        );

        Ok(Self::new(
            service,
            Arc::new(InMemoryPlanRepository::new()),
            RateLimiter::with_default_message(config.rate_limit_max, config.rate_limit_window()),
            RateLimiter::with_default_message(
                config.ai_rate_limit_max,
                config.ai_rate_limit_window(),
            ),
        ))
    }

    pub fn cache(&self) -> &SharedCache {
        self.service.cache()
    }
}

/// Handler for GET /
pub async fn root_handler() -> Json<StatusResponse> {
    Json(StatusResponse::running())
}

/// Handler for POST /curate-resources
///
/// Searches for resources on the subject, then has them curated down to five.
pub async fn curate_handler(
    State(state): State<AppState>,
    Json(req): Json<CurateRequest>,
) -> Result<Json<CuratedResourceSet>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let search = state.service.search_resources(&req.subject).await;
    let curated = state.service.curate_resources(&search, &req.subject).await?;

    Ok(Json(curated))
}

/// Handler for POST /generate-plan
///
/// Generates (or serves a cached) plan and persists a copy of it.
pub async fn generate_plan_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PlanRequest>,
) -> Result<Json<StudyPlan>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let user_id = req
        .user_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .or_else(|| {
            headers
                .get(USER_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .filter(|id| !id.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| ANONYMOUS_USER.to_string());

    let plan = state
        .service
        .generate_plan(&req.subject, &user_id, &req.exam_date)
        .await?;
    state.plans.save(plan.clone()).await?;

    Ok(Json(plan))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache().read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
