//! UpdatePlanOverridesHandler - Set and clear per-topic turn overrides.
//!
//! Set and clear are carried in one command: entries with a value are set
//! (positive integers only), entries with `None` are cleared back to the
//! automatic budget. Unknown topic ids are accepted and simply never match.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::foundation::{BotId, DomainError, ValidationError};
use crate::domain::plan::{InterviewPlan, PlanOverrides};
use crate::ports::PlanRepository;

/// Command to update a bot's plan overrides.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlanOverridesCommand {
    pub bot_id: BotId,
    /// `Some(n)` sets the topic's turns to `n`; `None` clears the override.
    pub topic_turns: BTreeMap<String, Option<u32>>,
    /// `Some(Some(n))` sets the deep-phase cap; `Some(None)` clears it.
    pub max_turns_per_topic: Option<Option<u32>>,
    /// `Some(Some(n))` sets the fallback; `Some(None)` clears it.
    pub fallback_turns: Option<Option<u32>>,
}

/// Result: the stored override set and the resulting effective plan.
#[derive(Debug, Clone)]
pub struct UpdatePlanOverridesResult {
    pub overrides: PlanOverrides,
    pub effective: InterviewPlan,
}

/// Error type for override updates.
#[derive(Debug, Clone)]
pub enum UpdatePlanOverridesError {
    /// No base plan has been generated for this bot.
    PlanNotFound(BotId),
    /// A requested value was not a positive integer in range.
    Validation(ValidationError),
    /// Domain error from a port.
    Domain(DomainError),
}

impl std::fmt::Display for UpdatePlanOverridesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdatePlanOverridesError::PlanNotFound(id) => {
                write!(f, "No plan generated for bot: {}", id)
            }
            UpdatePlanOverridesError::Validation(err) => write!(f, "{}", err),
            UpdatePlanOverridesError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for UpdatePlanOverridesError {}

impl From<DomainError> for UpdatePlanOverridesError {
    fn from(err: DomainError) -> Self {
        UpdatePlanOverridesError::Domain(err)
    }
}

impl From<ValidationError> for UpdatePlanOverridesError {
    fn from(err: ValidationError) -> Self {
        UpdatePlanOverridesError::Validation(err)
    }
}

/// Handler for override updates.
pub struct UpdatePlanOverridesHandler {
    plans: Arc<dyn PlanRepository>,
}

impl UpdatePlanOverridesHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(
        &self,
        cmd: UpdatePlanOverridesCommand,
    ) -> Result<UpdatePlanOverridesResult, UpdatePlanOverridesError> {
        let base = self
            .plans
            .find_base_plan(&cmd.bot_id)
            .await?
            .ok_or(UpdatePlanOverridesError::PlanNotFound(cmd.bot_id))?;

        let mut overrides = self.plans.find_overrides(&cmd.bot_id).await?;

        for (topic_id, turns) in &cmd.topic_turns {
            match turns {
                Some(turns) => overrides.set_topic_turns(topic_id, *turns)?,
                None => overrides.clear_topic_turns(topic_id),
            }
        }
        if let Some(cap) = cmd.max_turns_per_topic {
            match cap {
                Some(cap) => overrides.set_max_turns_per_topic(cap)?,
                None => overrides.clear_max_turns_per_topic(),
            }
        }
        if let Some(fallback) = cmd.fallback_turns {
            match fallback {
                Some(fallback) => overrides.set_fallback_turns(fallback)?,
                None => overrides.clear_fallback_turns(),
            }
        }

        self.plans.save_overrides(&cmd.bot_id, &overrides).await?;
        let effective = overrides.apply(&base);

        Ok(UpdatePlanOverridesResult {
            overrides,
            effective,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPlanRepository;
    use crate::domain::plan::PlanBuilder;

    async fn seeded(plans: &InMemoryPlanRepository) -> BotId {
        let bot_id = BotId::new();
        let plan = PlanBuilder::new(20, 60)
            .with_deep_topic("clienti", "Clienti")
            .with_deep_topic("prezzi", "Prezzi")
            .build()
            .unwrap();
        plans.save_base_plan(&bot_id, &plan).await.unwrap();
        bot_id
    }

    #[tokio::test]
    async fn sets_and_persists_override() {
        let plans = Arc::new(InMemoryPlanRepository::new());
        let bot_id = seeded(&plans).await;
        let handler = UpdatePlanOverridesHandler::new(plans.clone());

        let mut cmd = UpdatePlanOverridesCommand {
            bot_id,
            ..Default::default()
        };
        cmd.topic_turns.insert("clienti".to_string(), Some(4));

        let result = handler.handle(cmd).await.unwrap();
        assert_eq!(result.effective.topic("clienti").unwrap().max_turns, 4);
        assert!(!plans.find_overrides(&bot_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clearing_restores_base_value() {
        let plans = Arc::new(InMemoryPlanRepository::new());
        let bot_id = seeded(&plans).await;
        let handler = UpdatePlanOverridesHandler::new(plans.clone());

        let base_turns = plans
            .find_base_plan(&bot_id)
            .await
            .unwrap()
            .unwrap()
            .topic("clienti")
            .unwrap()
            .max_turns;

        let mut set = UpdatePlanOverridesCommand {
            bot_id,
            ..Default::default()
        };
        set.topic_turns.insert("clienti".to_string(), Some(2));
        handler.handle(set).await.unwrap();

        let mut clear = UpdatePlanOverridesCommand {
            bot_id,
            ..Default::default()
        };
        clear.topic_turns.insert("clienti".to_string(), None);
        let result = handler.handle(clear).await.unwrap();

        assert_eq!(
            result.effective.topic("clienti").unwrap().max_turns,
            base_turns
        );
    }

    #[tokio::test]
    async fn zero_turns_is_rejected() {
        let plans = Arc::new(InMemoryPlanRepository::new());
        let bot_id = seeded(&plans).await;
        let handler = UpdatePlanOverridesHandler::new(plans);

        let mut cmd = UpdatePlanOverridesCommand {
            bot_id,
            ..Default::default()
        };
        cmd.topic_turns.insert("clienti".to_string(), Some(0));

        assert!(matches!(
            handler.handle(cmd).await,
            Err(UpdatePlanOverridesError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn missing_plan_is_an_error() {
        let handler = UpdatePlanOverridesHandler::new(Arc::new(InMemoryPlanRepository::new()));
        let cmd = UpdatePlanOverridesCommand {
            bot_id: BotId::new(),
            ..Default::default()
        };
        assert!(matches!(
            handler.handle(cmd).await,
            Err(UpdatePlanOverridesError::PlanNotFound(_))
        ));
    }
}
