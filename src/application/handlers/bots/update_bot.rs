//! UpdateBotHandler - Rename a bot or toggle its KB growth flag.

use std::sync::Arc;

use crate::domain::bot::Bot;
use crate::domain::foundation::{BotId, DomainError, ValidationError};
use crate::ports::BotRepository;

/// Command to update a bot. Unset fields are left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateBotCommand {
    pub bot_id: BotId,
    pub name: Option<String>,
    pub kb_enabled: Option<bool>,
}

/// Error type for bot updates.
#[derive(Debug, Clone)]
pub enum UpdateBotError {
    /// Bot not found.
    NotFound(BotId),
    /// Invalid bot attributes.
    Validation(ValidationError),
    /// Domain error from a port.
    Domain(DomainError),
}

impl std::fmt::Display for UpdateBotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateBotError::NotFound(id) => write!(f, "Bot not found: {}", id),
            UpdateBotError::Validation(err) => write!(f, "{}", err),
            UpdateBotError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for UpdateBotError {}

impl From<DomainError> for UpdateBotError {
    fn from(err: DomainError) -> Self {
        UpdateBotError::Domain(err)
    }
}

impl From<ValidationError> for UpdateBotError {
    fn from(err: ValidationError) -> Self {
        UpdateBotError::Validation(err)
    }
}

/// Handler for bot updates.
pub struct UpdateBotHandler {
    bots: Arc<dyn BotRepository>,
}

impl UpdateBotHandler {
    pub fn new(bots: Arc<dyn BotRepository>) -> Self {
        Self { bots }
    }

    pub async fn handle(&self, cmd: UpdateBotCommand) -> Result<Bot, UpdateBotError> {
        let mut bot = self
            .bots
            .find_by_id(&cmd.bot_id)
            .await?
            .ok_or(UpdateBotError::NotFound(cmd.bot_id))?;

        if let Some(name) = cmd.name {
            bot.rename(name)?;
        }
        if let Some(enabled) = cmd.kb_enabled {
            bot.set_kb_enabled(enabled);
        }

        self.bots.update(&bot).await?;
        Ok(bot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBotRepository;
    use crate::domain::bot::BotKind;
    use crate::domain::foundation::ProjectId;

    async fn seeded(bots: &InMemoryBotRepository) -> BotId {
        let bot = Bot::new(BotId::new(), ProjectId::new(), "Tuner", BotKind::Chatbot).unwrap();
        bots.save(&bot).await.unwrap();
        bot.id()
    }

    #[tokio::test]
    async fn renames_and_toggles_kb() {
        let bots = Arc::new(InMemoryBotRepository::new());
        let bot_id = seeded(&bots).await;

        let updated = UpdateBotHandler::new(bots.clone())
            .handle(UpdateBotCommand {
                bot_id,
                name: Some("Tuner 2".to_string()),
                kb_enabled: Some(true),
            })
            .await
            .unwrap();

        assert_eq!(updated.name(), "Tuner 2");
        assert!(updated.kb_enabled());
        assert!(bots.find_by_id(&bot_id).await.unwrap().unwrap().kb_enabled());
    }

    #[tokio::test]
    async fn empty_rename_is_rejected() {
        let bots = Arc::new(InMemoryBotRepository::new());
        let bot_id = seeded(&bots).await;

        let result = UpdateBotHandler::new(bots)
            .handle(UpdateBotCommand {
                bot_id,
                name: Some(String::new()),
                kb_enabled: None,
            })
            .await;
        assert!(matches!(result, Err(UpdateBotError::Validation(_))));
    }

    #[tokio::test]
    async fn missing_bot_is_not_found() {
        let result = UpdateBotHandler::new(Arc::new(InMemoryBotRepository::new()))
            .handle(UpdateBotCommand {
                bot_id: BotId::new(),
                name: None,
                kb_enabled: Some(true),
            })
            .await;
        assert!(matches!(result, Err(UpdateBotError::NotFound(_))));
    }
}
