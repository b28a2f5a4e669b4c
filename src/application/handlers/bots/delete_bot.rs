//! DeleteBotHandler - Delete a bot.

use std::sync::Arc;

use crate::domain::foundation::{BotId, DomainError, ErrorCode};
use crate::ports::BotRepository;

/// Command to delete a bot.
#[derive(Debug, Clone)]
pub struct DeleteBotCommand {
    pub bot_id: BotId,
}

/// Error type for bot deletion.
#[derive(Debug, Clone)]
pub enum DeleteBotError {
    /// Bot not found.
    NotFound(BotId),
    /// Domain error from a port.
    Domain(DomainError),
}

impl std::fmt::Display for DeleteBotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteBotError::NotFound(id) => write!(f, "Bot not found: {}", id),
            DeleteBotError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for DeleteBotError {}

/// Handler for bot deletion.
pub struct DeleteBotHandler {
    bots: Arc<dyn BotRepository>,
}

impl DeleteBotHandler {
    pub fn new(bots: Arc<dyn BotRepository>) -> Self {
        Self { bots }
    }

    pub async fn handle(&self, cmd: DeleteBotCommand) -> Result<(), DeleteBotError> {
        self.bots.delete(&cmd.bot_id).await.map_err(|err| {
            if err.code == ErrorCode::BotNotFound {
                DeleteBotError::NotFound(cmd.bot_id)
            } else {
                DeleteBotError::Domain(err)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBotRepository;
    use crate::domain::bot::{Bot, BotKind};
    use crate::domain::foundation::ProjectId;

    #[tokio::test]
    async fn deletes_existing_bot() {
        let bots = Arc::new(InMemoryBotRepository::new());
        let bot = Bot::new(BotId::new(), ProjectId::new(), "Tuner", BotKind::Chatbot).unwrap();
        bots.save(&bot).await.unwrap();

        DeleteBotHandler::new(bots.clone())
            .handle(DeleteBotCommand { bot_id: bot.id() })
            .await
            .unwrap();
        assert!(bots.find_by_id(&bot.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_bot_is_not_found() {
        let result = DeleteBotHandler::new(Arc::new(InMemoryBotRepository::new()))
            .handle(DeleteBotCommand {
                bot_id: BotId::new(),
            })
            .await;
        assert!(matches!(result, Err(DeleteBotError::NotFound(_))));
    }
}
