//! Study plan records.
//!
//! Field names serialize in camelCase to match what clients of the plan
//! endpoint consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary block at the top of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOverview {
    pub subject: String,
    pub duration: String,
    pub exam_date: String,
}

/// One day's worth of work inside a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    pub day: String,
    pub tasks: Vec<String>,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub week: String,
    pub goals: Vec<String>,
    pub daily_tasks: Vec<DailyTask>,
}

/// The plan body as produced by the completion provider, after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub overview: PlanOverview,
    pub weekly_plans: Vec<WeeklyPlan>,
    pub recommendations: Vec<String>,
}

/// A study plan ready to hand to the caller and the plan repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub user_id: String,
    pub overview: PlanOverview,
    pub weekly_plans: Vec<WeeklyPlan>,
    pub recommendations: Vec<String>,
    pub is_active: bool,
    /// Completion percentage
    pub progress: u32,
    pub last_updated: DateTime<Utc>,
}

impl StudyPlan {
    /// Builds a fresh, active plan with no progress.
    pub fn new(user_id: impl Into<String>, generated: GeneratedPlan, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            overview: generated.overview,
            weekly_plans: generated.weekly_plans,
            recommendations: generated.recommendations,
            is_active: true,
            progress: 0,
            last_updated: now,
        }
    }
}
