//! StartInterviewHandler - Open a new interview session for a bot.
//!
//! The session snapshots the bot's effective plan (base plan with overrides
//! applied) at creation time; later plan edits never touch running
//! interviews. The opening message asks for consent, so the first user reply
//! is classified in the consent context.

use std::sync::Arc;

use crate::domain::foundation::{BotId, DomainError, InterviewId};
use crate::domain::interview::InterviewSession;
use crate::ports::{BotRepository, InterviewRepository, PlanRepository};

/// Opening message sent by the assistant when an interview starts.
pub const CONSENT_PROMPT: &str = "Ciao! Sono l'assistente che la guiderà in questa breve \
     intervista sulla sua attività. Posso registrare le sue risposte per migliorare il \
     servizio? Risponda pure liberamente.";

/// Command to start an interview.
#[derive(Debug, Clone)]
pub struct StartInterviewCommand {
    pub bot_id: BotId,
}

/// Result of starting an interview.
#[derive(Debug, Clone)]
pub struct StartInterviewResult {
    pub session: InterviewSession,
    /// The assistant's opening message.
    pub greeting: String,
}

/// Error type for starting interviews.
#[derive(Debug, Clone)]
pub enum StartInterviewError {
    /// Bot not found.
    BotNotFound(BotId),
    /// No plan has been generated for the bot.
    PlanNotFound(BotId),
    /// Domain error from a port.
    Domain(DomainError),
}

impl std::fmt::Display for StartInterviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartInterviewError::BotNotFound(id) => write!(f, "Bot not found: {}", id),
            StartInterviewError::PlanNotFound(id) => {
                write!(f, "No plan generated for bot: {}", id)
            }
            StartInterviewError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for StartInterviewError {}

impl From<DomainError> for StartInterviewError {
    fn from(err: DomainError) -> Self {
        StartInterviewError::Domain(err)
    }
}

/// Handler for starting interviews.
pub struct StartInterviewHandler {
    bots: Arc<dyn BotRepository>,
    plans: Arc<dyn PlanRepository>,
    interviews: Arc<dyn InterviewRepository>,
}

impl StartInterviewHandler {
    pub fn new(
        bots: Arc<dyn BotRepository>,
        plans: Arc<dyn PlanRepository>,
        interviews: Arc<dyn InterviewRepository>,
    ) -> Self {
        Self {
            bots,
            plans,
            interviews,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartInterviewCommand,
    ) -> Result<StartInterviewResult, StartInterviewError> {
        let bot = self
            .bots
            .find_by_id(&cmd.bot_id)
            .await?
            .ok_or(StartInterviewError::BotNotFound(cmd.bot_id))?;

        let base = self
            .plans
            .find_base_plan(&bot.id())
            .await?
            .ok_or(StartInterviewError::PlanNotFound(cmd.bot_id))?;
        let overrides = self.plans.find_overrides(&bot.id()).await?;
        let effective = overrides.apply(&base);

        let mut session = InterviewSession::new(InterviewId::new(), bot.id(), effective);
        session.start()?;
        session.add_assistant_message(CONSENT_PROMPT)?;
        self.interviews.save(&session).await?;

        tracing::info!(
            interview_id = %session.id(),
            bot_id = %bot.id(),
            topics = session.plan().topic_count(),
            "started interview"
        );

        Ok(StartInterviewResult {
            session,
            greeting: CONSENT_PROMPT.to_string(),
        })
    }
}
