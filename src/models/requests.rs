//! Request DTOs for the study API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for POST /curate-resources
#[derive(Debug, Clone, Deserialize)]
pub struct CurateRequest {
    /// What the user wants to learn
    pub subject: String,
}

impl CurateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_subject(&self.subject)
    }
}

/// Request body for POST /generate-plan
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub subject: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub exam_date: String,
    /// Falls back to the `x-user-id` header when absent
    #[serde(default)]
    pub user_id: Option<String>,
}

impl PlanRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(msg) = validate_subject(&self.subject) {
            return Some(msg);
        }
        if self.exam_date.trim().is_empty() {
            return Some("Exam date is required".to_string());
        }
        None
    }
}

fn validate_subject(subject: &str) -> Option<String> {
    if subject.trim().is_empty() {
        return Some("Subject is required".to_string());
    }
    None
}
