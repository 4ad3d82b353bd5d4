//! Mind Mentor - study resource curation and study plan backend
//!
//! Proxies resource searches and LLM completions behind a TTL cache and
//! per-client rate limits.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mind_mentor::{create_router, spawn_cleanup_task, AppState, Config};

/// Main entry point for the Mind Mentor API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build cache, providers, plan repository and rate limiters
/// 4. Start background cleanup task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mind_mentor=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mind Mentor API");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_ttl={}s, global_limit={}/{}s, ai_limit={}/{}s, tavily_key={}",
        config.server_port,
        config.cache_ttl,
        config.rate_limit_max,
        config.rate_limit_window,
        config.ai_rate_limit_max,
        config.ai_rate_limit_window,
        config.tavily_api_key.is_some(),
    );

    let state = AppState::from_config(&config).context("failed to initialize application state")?;
    info!("Providers initialized with model {}", config.groq_model);

    let cleanup_handle = spawn_cleanup_task(
        state.cache().clone(),
        vec![state.global_limiter.clone(), state.ai_limiter.clone()],
        config.cleanup_interval,
    );

    let app = create_router(state, &config.cors_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Peer addresses back the rate limiter when no proxy header is present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(cleanup_handle))
    .await
    .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
