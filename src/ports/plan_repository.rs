//! Plan repository port: base plans and per-bot overrides.
//!
//! The base plan and the override set are stored separately. The effective
//! plan clients see is always computed as `overrides.apply(&base)` at read
//! time; only new interview sessions snapshot it.

use async_trait::async_trait;

use crate::domain::foundation::{BotId, DomainError};
use crate::domain::plan::{InterviewPlan, PlanOverrides};

/// Repository port for interview plans and their overrides.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Store the base plan for a bot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save_base_plan(&self, bot_id: &BotId, plan: &InterviewPlan)
        -> Result<(), DomainError>;

    /// Load the base plan for a bot.
    ///
    /// Returns `None` if no plan has been generated yet.
    async fn find_base_plan(&self, bot_id: &BotId) -> Result<Option<InterviewPlan>, DomainError>;

    /// Store the override set for a bot, replacing any previous one.
    ///
    /// An empty override set is valid and means "use the base plan as-is".
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save_overrides(
        &self,
        bot_id: &BotId,
        overrides: &PlanOverrides,
    ) -> Result<(), DomainError>;

    /// Load the override set for a bot.
    ///
    /// Returns an empty set if none has been stored.
    async fn find_overrides(&self, bot_id: &BotId) -> Result<PlanOverrides, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PlanRepository) {}
    }
}
