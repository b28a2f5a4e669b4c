//! GetBotHandler - Fetch one bot by id.

use std::sync::Arc;

use crate::domain::bot::Bot;
use crate::domain::foundation::{BotId, DomainError};
use crate::ports::BotRepository;

/// Query for one bot.
#[derive(Debug, Clone)]
pub struct GetBotQuery {
    pub bot_id: BotId,
}

/// Error type for bot reads.
#[derive(Debug, Clone)]
pub enum GetBotError {
    /// Bot not found.
    NotFound(BotId),
    /// Domain error from a port.
    Domain(DomainError),
}

impl std::fmt::Display for GetBotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetBotError::NotFound(id) => write!(f, "Bot not found: {}", id),
            GetBotError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetBotError {}

impl From<DomainError> for GetBotError {
    fn from(err: DomainError) -> Self {
        GetBotError::Domain(err)
    }
}

/// Handler for bot reads.
pub struct GetBotHandler {
    bots: Arc<dyn BotRepository>,
}

impl GetBotHandler {
    pub fn new(bots: Arc<dyn BotRepository>) -> Self {
        Self { bots }
    }

    pub async fn handle(&self, query: GetBotQuery) -> Result<Bot, GetBotError> {
        self.bots
            .find_by_id(&query.bot_id)
            .await?
            .ok_or(GetBotError::NotFound(query.bot_id))
    }
}
