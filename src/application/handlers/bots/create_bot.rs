//! CreateBotHandler - Create a bot under a project.

use std::sync::Arc;

use crate::domain::bot::{Bot, BotKind};
use crate::domain::foundation::{BotId, DomainError, ProjectId, ValidationError};
use crate::ports::BotRepository;

/// Command to create a bot.
#[derive(Debug, Clone)]
pub struct CreateBotCommand {
    pub project_id: ProjectId,
    pub name: String,
    pub kind: BotKind,
}

/// Result of creating a bot.
#[derive(Debug, Clone)]
pub struct CreateBotResult {
    pub bot: Bot,
}

/// Error type for bot creation.
#[derive(Debug, Clone)]
pub enum CreateBotError {
    /// Invalid bot attributes.
    Validation(ValidationError),
    /// Domain error from a port.
    Domain(DomainError),
}

impl std::fmt::Display for CreateBotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateBotError::Validation(err) => write!(f, "{}", err),
            CreateBotError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CreateBotError {}

impl From<DomainError> for CreateBotError {
    fn from(err: DomainError) -> Self {
        CreateBotError::Domain(err)
    }
}

impl From<ValidationError> for CreateBotError {
    fn from(err: ValidationError) -> Self {
        CreateBotError::Validation(err)
    }
}

/// Handler for bot creation.
pub struct CreateBotHandler {
    bots: Arc<dyn BotRepository>,
}

impl CreateBotHandler {
    pub fn new(bots: Arc<dyn BotRepository>) -> Self {
        Self { bots }
    }

    pub async fn handle(&self, cmd: CreateBotCommand) -> Result<CreateBotResult, CreateBotError> {
        let bot = Bot::new(BotId::new(), cmd.project_id, cmd.name, cmd.kind)?;
        self.bots.save(&bot).await?;
        tracing::info!(bot_id = %bot.id(), kind = ?bot.kind(), "created bot");
        Ok(CreateBotResult { bot })
    }
}
