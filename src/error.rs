//! Error types for the study backend
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::RejectReason;

// == App Error Enum ==
/// Unified error type for the study backend.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// External provider unreachable or returned a non-success status
    #[error("Upstream request failed: {0}")]
    Fetch(String),

    /// Provider payload does not have the required shape
    #[error("Invalid response format: {0}")]
    Validation(#[from] RejectReason),

    /// Provider reply text is not valid JSON
    #[error("Unparseable response: {0}")]
    Parse(String),

    /// Client exceeded its request budget for the current window
    #[error("{message}")]
    RateLimited {
        message: String,
        retry_after: Duration,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Fetch(_) | AppError::Validation(_) | AppError::Parse(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string()
        }));

        match self {
            AppError::RateLimited { retry_after, .. } => {
                // Round up so clients never retry a fraction of a second early
                let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                (status, [(header::RETRY_AFTER, secs.to_string())], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the study backend.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Fetch("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::Parse("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::Validation(RejectReason::WrongResourceCount(4)).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rate_limited_sets_retry_after() {
        let err = AppError::RateLimited {
            message: "Too many requests".to_string(),
            retry_after: Duration::from_millis(1500),
        };
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "2");
    }
}
