//! In-memory plan repository for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{BotId, DomainError};
use crate::domain::plan::{InterviewPlan, PlanOverrides};
use crate::ports::PlanRepository;

/// HashMap-backed implementation of `PlanRepository`.
#[derive(Default)]
pub struct InMemoryPlanRepository {
    base_plans: RwLock<HashMap<BotId, InterviewPlan>>,
    overrides: RwLock<HashMap<BotId, PlanOverrides>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn save_base_plan(
        &self,
        bot_id: &BotId,
        plan: &InterviewPlan,
    ) -> Result<(), DomainError> {
        self.base_plans.write().unwrap().insert(*bot_id, plan.clone());
        Ok(())
    }

    async fn find_base_plan(&self, bot_id: &BotId) -> Result<Option<InterviewPlan>, DomainError> {
        Ok(self.base_plans.read().unwrap().get(bot_id).cloned())
    }

    async fn save_overrides(
        &self,
        bot_id: &BotId,
        overrides: &PlanOverrides,
    ) -> Result<(), DomainError> {
        self.overrides
            .write()
            .unwrap()
            .insert(*bot_id, overrides.clone());
        Ok(())
    }

    async fn find_overrides(&self, bot_id: &BotId) -> Result<PlanOverrides, DomainError> {
        Ok(self
            .overrides
            .read()
            .unwrap()
            .get(bot_id)
            .cloned()
            .unwrap_or_default())
    }
}
