//! API Routes
//!
//! Configures the Axum router with all endpoints and middleware.

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    curate_handler, generate_plan_handler, health_handler, root_handler, stats_handler, AppState,
    USER_ID_HEADER,
};
use crate::ratelimit::enforce_rate_limit;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Service banner
/// - `GET /health` - Health check endpoint
/// - `GET /stats` - Cache statistics
/// - `POST /curate-resources` - Search and curate five resources for a subject
/// - `POST /generate-plan` - Generate and persist a study plan
///
/// # Middleware
/// - Global rate limit on every route, AI rate limit on the two POST routes
/// - CORS: configured origin allowlist with credentials
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let ai_routes = Router::new()
        .route("/curate-resources", post(curate_handler))
        .route("/generate-plan", post(generate_plan_handler))
        .route_layer(middleware::from_fn_with_state(
            state.ai_limiter.clone(),
            enforce_rate_limit,
        ));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .merge(ai_routes)
        .layer(middleware::from_fn_with_state(
            state.global_limiter.clone(),
            enforce_rate_limit,
        ))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(USER_ID_HEADER),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::cache::CacheStore;
    use crate::error::{AppError, Result};
    use crate::models::SearchResult;
    use crate::providers::{
        CompletionProvider, CompletionRequest, SearchProvider, SearchQuery,
    };
    use crate::ratelimit::RateLimiter;
    use crate::service::StudyService;
    use crate::storage::InMemoryPlanRepository;

    struct Offline;

    #[async_trait]
    impl SearchProvider for Offline {
        async fn search(&self, _query: &SearchQuery) -> Result<SearchResult> {
            Err(AppError::Fetch("offline".to_string()))
        }
    }

    #[async_trait]
    impl CompletionProvider for Offline {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
            Err(AppError::Fetch("offline".to_string()))
        }
    }

    fn create_test_app() -> Router {
        let ttl = Duration::from_secs(300);
        let service = StudyService::new(
            CacheStore::shared(ttl),
            Arc::new(Offline),
            Arc::new(Offline),
            ttl,
        );
        let state = AppState::new(
            service,
            Arc::new(InMemoryPlanRepository::new()),
            RateLimiter::with_default_message(100, Duration::from_secs(900)),
            RateLimiter::with_default_message(100, Duration::from_secs(3600)),
        );
        create_router(state, &["http://localhost:3000".to_string()])
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["ratelimit-limit"], "100");
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_curate_propagates_provider_failure() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/curate-resources")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"subject":"Rust"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_configured_origin() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/generate-plan")
                    .header("origin", "http://localhost:3000")
                    .header("access-control-request-method", "POST")
                    .header("access-control-request-headers", "x-user-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
        assert_eq!(response.headers()["access-control-allow-credentials"], "true");
    }
}
