//! Request, response and domain models
//!
//! This module defines the DTOs used for HTTP bodies and the payloads that
//! flow through the cache.

pub mod plan;
pub mod requests;
pub mod resources;
pub mod responses;

// Re-export commonly used types
pub use plan::{DailyTask, GeneratedPlan, PlanOverview, StudyPlan, WeeklyPlan};
pub use requests::{CurateRequest, PlanRequest};
pub use resources::{
    CuratedResource, CuratedResourceSet, SearchHit, SearchResult, CURATED_RESOURCE_COUNT,
};
pub use responses::{HealthResponse, StatsResponse, StatusResponse};
