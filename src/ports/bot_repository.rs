//! Bot repository port (write side).

use async_trait::async_trait;

use crate::domain::bot::Bot;
use crate::domain::foundation::{BotId, DomainError, ProjectId};

/// Repository port for Bot aggregate persistence.
#[async_trait]
pub trait BotRepository: Send + Sync {
    /// Save a new bot.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, bot: &Bot) -> Result<(), DomainError>;

    /// Update an existing bot.
    ///
    /// # Errors
    ///
    /// - `BotNotFound` if the bot doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, bot: &Bot) -> Result<(), DomainError>;

    /// Find a bot by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &BotId) -> Result<Option<Bot>, DomainError>;

    /// List all bots owned by a project, newest first.
    async fn list_by_project(&self, project_id: &ProjectId) -> Result<Vec<Bot>, DomainError>;

    /// List all bots with knowledge-base growth enabled.
    ///
    /// Used by the growth cron to scope ingestion.
    async fn list_kb_enabled(&self) -> Result<Vec<Bot>, DomainError>;

    /// Delete a bot.
    ///
    /// # Errors
    ///
    /// - `BotNotFound` if the bot doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &BotId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn BotRepository) {}
    }
}
