//! Axum middleware applying a [`RateLimiter`] to a router.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::RateLimiter;
use crate::error::Result;

/// Rejects the request with 429 when the client is over budget; otherwise
/// runs it and stamps `RateLimit-*` headers on the response.
pub async fn enforce_rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request,
    next: Next,
) -> Result<Response> {
    let client = client_identity(&req);

    let decision = match limiter.check(&client).await {
        Ok(decision) => decision,
        Err(e) => {
            warn!("Rate limit exceeded for {} on {}", client, req.uri().path());
            return Err(e);
        }
    };

    let mut response = next.run(req).await;
    decision.apply_headers(response.headers_mut());
    Ok(response)
}

/// Resolves who is calling.
///
/// The service sits behind one reverse proxy, so the rightmost
/// `X-Forwarded-For` entry (the one that proxy appended) is trusted.
pub fn client_identity(req: &Request) -> String {
    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit(',').map(str::trim).find(|ip| !ip.is_empty()));
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
