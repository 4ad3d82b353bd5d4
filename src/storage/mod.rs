//! Plan Storage
//!
//! Durable storage for generated plans sits behind [`PlanRepository`]. The
//! repository keeps its own copy, so later progress updates there never
//! touch the cached plan.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::models::StudyPlan;

/// Persistence for generated study plans.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn save(&self, plan: StudyPlan) -> Result<()>;

    async fn plans_for_user(&self, user_id: &str) -> Vec<StudyPlan>;
}

/// Process-local plan repository.
#[derive(Debug, Default)]
pub struct InMemoryPlanRepository {
    plans: RwLock<Vec<StudyPlan>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.plans.read().await.len()
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn save(&self, plan: StudyPlan) -> Result<()> {
        debug!("Saving plan for user '{}'", plan.user_id);
        self.plans.write().await.push(plan);
        Ok(())
    }

    async fn plans_for_user(&self, user_id: &str) -> Vec<StudyPlan> {
        self.plans
            .read()
            .await
            .iter()
            .filter(|plan| plan.user_id == user_id)
            .cloned()
            .collect()
    }
}
