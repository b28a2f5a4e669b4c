//! GeneratePlanHandler - Build and store a bot's base interview plan.
//!
//! Budgeting is deterministic: the same topics and timing always produce the
//! same plan. Regenerating replaces the stored base plan; existing override
//! sets stay in place and re-apply to the new base.

use std::sync::Arc;

use crate::domain::foundation::{BotId, DomainError, ValidationError};
use crate::domain::plan::{InterviewPlan, PlanBuilder};
use crate::ports::{BotRepository, PlanRepository};

/// A topic requested for the plan.
#[derive(Debug, Clone)]
pub struct TopicSpec {
    pub id: String,
    pub label: String,
}

/// Command to generate a base plan.
#[derive(Debug, Clone)]
pub struct GeneratePlanCommand {
    pub bot_id: BotId,
    pub duration_minutes: u32,
    pub seconds_per_turn: u32,
    pub scan_topics: Vec<TopicSpec>,
    pub deep_topics: Vec<TopicSpec>,
    pub max_turns_per_topic: Option<u32>,
    pub fallback_turns: Option<u32>,
}

/// Result of generating a plan.
#[derive(Debug, Clone)]
pub struct GeneratePlanResult {
    pub plan: InterviewPlan,
}

/// Error type for plan generation.
#[derive(Debug, Clone)]
pub enum GeneratePlanError {
    /// Bot not found.
    BotNotFound(BotId),
    /// Invalid plan parameters.
    Validation(ValidationError),
    /// Domain error from a port.
    Domain(DomainError),
}

impl std::fmt::Display for GeneratePlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratePlanError::BotNotFound(id) => write!(f, "Bot not found: {}", id),
            GeneratePlanError::Validation(err) => write!(f, "{}", err),
            GeneratePlanError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GeneratePlanError {}

impl From<DomainError> for GeneratePlanError {
    fn from(err: DomainError) -> Self {
        GeneratePlanError::Domain(err)
    }
}

impl From<ValidationError> for GeneratePlanError {
    fn from(err: ValidationError) -> Self {
        GeneratePlanError::Validation(err)
    }
}

/// Handler for generating base plans.
pub struct GeneratePlanHandler {
    bots: Arc<dyn BotRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl GeneratePlanHandler {
    pub fn new(bots: Arc<dyn BotRepository>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { bots, plans }
    }

    pub async fn handle(
        &self,
        cmd: GeneratePlanCommand,
    ) -> Result<GeneratePlanResult, GeneratePlanError> {
        self.bots
            .find_by_id(&cmd.bot_id)
            .await?
            .ok_or(GeneratePlanError::BotNotFound(cmd.bot_id))?;

        let mut builder = PlanBuilder::new(cmd.duration_minutes, cmd.seconds_per_turn);
        for topic in &cmd.scan_topics {
            builder = builder.with_scan_topic(&topic.id, &topic.label);
        }
        for topic in &cmd.deep_topics {
            builder = builder.with_deep_topic(&topic.id, &topic.label);
        }
        if let Some(cap) = cmd.max_turns_per_topic {
            builder = builder.with_max_turns_per_topic(cap);
        }
        if let Some(fallback) = cmd.fallback_turns {
            builder = builder.with_fallback_turns(fallback);
        }

        let plan = builder.build()?;
        self.plans.save_base_plan(&cmd.bot_id, &plan).await?;

        tracing::info!(
            bot_id = %cmd.bot_id,
            topics = plan.topic_count(),
            total_turns = plan.total_turn_budget(),
            "generated base plan"
        );

        Ok(GeneratePlanResult { plan })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryBotRepository, InMemoryPlanRepository};
    use crate::domain::bot::{Bot, BotKind};
    use crate::domain::foundation::ProjectId;

    async fn seeded_bot(bots: &InMemoryBotRepository) -> BotId {
        let bot = Bot::new(BotId::new(), ProjectId::new(), "Tuner", BotKind::Interview).unwrap();
        bots.save(&bot).await.unwrap();
        bot.id()
    }

    fn cmd(bot_id: BotId) -> GeneratePlanCommand {
        GeneratePlanCommand {
            bot_id,
            duration_minutes: 20,
            seconds_per_turn: 60,
            scan_topics: vec![TopicSpec {
                id: "origini".to_string(),
                label: "Origini".to_string(),
            }],
            deep_topics: vec![TopicSpec {
                id: "clienti".to_string(),
                label: "Clienti".to_string(),
            }],
            max_turns_per_topic: None,
            fallback_turns: None,
        }
    }

    #[tokio::test]
    async fn generates_and_stores_plan() {
        let bots = Arc::new(InMemoryBotRepository::new());
        let plans = Arc::new(InMemoryPlanRepository::new());
        let bot_id = seeded_bot(&bots).await;

        let handler = GeneratePlanHandler::new(bots, plans.clone());
        let result = handler.handle(cmd(bot_id)).await.unwrap();

        assert_eq!(result.plan.topic_count(), 2);
        assert_eq!(
            plans.find_base_plan(&bot_id).await.unwrap(),
            Some(result.plan)
        );
    }

    #[tokio::test]
    async fn unknown_bot_is_rejected() {
        let handler = GeneratePlanHandler::new(
            Arc::new(InMemoryBotRepository::new()),
            Arc::new(InMemoryPlanRepository::new()),
        );
        let result = handler.handle(cmd(BotId::new())).await;
        assert!(matches!(result, Err(GeneratePlanError::BotNotFound(_))));
    }

    #[tokio::test]
    async fn invalid_duration_is_rejected() {
        let bots = Arc::new(InMemoryBotRepository::new());
        let bot_id = seeded_bot(&bots).await;
        let handler = GeneratePlanHandler::new(bots, Arc::new(InMemoryPlanRepository::new()));

        let mut bad = cmd(bot_id);
        bad.duration_minutes = 2;
        assert!(matches!(
            handler.handle(bad).await,
            Err(GeneratePlanError::Validation(_))
        ));
    }
}
