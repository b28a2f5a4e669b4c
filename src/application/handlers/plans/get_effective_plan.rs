//! GetEffectivePlanHandler - Read a bot's plan with overrides applied.
//!
//! The effective plan is always computed at read time; nothing stores the
//! merged result. Running interviews are unaffected because sessions snapshot
//! the plan when they are created.

use std::sync::Arc;

use crate::domain::foundation::{BotId, DomainError};
use crate::domain::plan::{InterviewPlan, PlanOverrides};
use crate::ports::PlanRepository;

/// Query for a bot's effective plan.
#[derive(Debug, Clone)]
pub struct GetEffectivePlanQuery {
    pub bot_id: BotId,
}

/// Result: base, overrides, and the merged plan.
#[derive(Debug, Clone)]
pub struct GetEffectivePlanResult {
    pub base: InterviewPlan,
    pub overrides: PlanOverrides,
    pub effective: InterviewPlan,
}

/// Error type for reading effective plans.
#[derive(Debug, Clone)]
pub enum GetEffectivePlanError {
    /// No base plan has been generated for this bot.
    PlanNotFound(BotId),
    /// Domain error from a port.
    Domain(DomainError),
}

impl std::fmt::Display for GetEffectivePlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetEffectivePlanError::PlanNotFound(id) => {
                write!(f, "No plan generated for bot: {}", id)
            }
            GetEffectivePlanError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetEffectivePlanError {}

impl From<DomainError> for GetEffectivePlanError {
    fn from(err: DomainError) -> Self {
        GetEffectivePlanError::Domain(err)
    }
}

/// Handler for reading effective plans.
pub struct GetEffectivePlanHandler {
    plans: Arc<dyn PlanRepository>,
}

impl GetEffectivePlanHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(
        &self,
        query: GetEffectivePlanQuery,
    ) -> Result<GetEffectivePlanResult, GetEffectivePlanError> {
        let base = self
            .plans
            .find_base_plan(&query.bot_id)
            .await?
            .ok_or(GetEffectivePlanError::PlanNotFound(query.bot_id))?;
        let overrides = self.plans.find_overrides(&query.bot_id).await?;
        let effective = overrides.apply(&base);

        Ok(GetEffectivePlanResult {
            base,
            overrides,
            effective,
        })
    }
}
