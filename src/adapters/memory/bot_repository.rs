//! In-memory bot repository for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::bot::Bot;
use crate::domain::foundation::{BotId, DomainError, ErrorCode, ProjectId};
use crate::ports::BotRepository;

/// HashMap-backed implementation of `BotRepository`.
#[derive(Default)]
pub struct InMemoryBotRepository {
    bots: RwLock<HashMap<BotId, Bot>>,
}

impl InMemoryBotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BotRepository for InMemoryBotRepository {
    async fn save(&self, bot: &Bot) -> Result<(), DomainError> {
        self.bots.write().unwrap().insert(bot.id(), bot.clone());
        Ok(())
    }

    async fn update(&self, bot: &Bot) -> Result<(), DomainError> {
        let mut bots = self.bots.write().unwrap();
        if !bots.contains_key(&bot.id()) {
            return Err(DomainError::new(
                ErrorCode::BotNotFound,
                format!("bot {} not found", bot.id()),
            ));
        }
        bots.insert(bot.id(), bot.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BotId) -> Result<Option<Bot>, DomainError> {
        Ok(self.bots.read().unwrap().get(id).cloned())
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> Result<Vec<Bot>, DomainError> {
        let mut bots: Vec<Bot> = self
            .bots
            .read()
            .unwrap()
            .values()
            .filter(|b| b.project_id() == *project_id)
            .cloned()
            .collect();
        bots.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(bots)
    }

    async fn list_kb_enabled(&self) -> Result<Vec<Bot>, DomainError> {
        let mut bots: Vec<Bot> = self
            .bots
            .read()
            .unwrap()
            .values()
            .filter(|b| b.kb_enabled())
            .cloned()
            .collect();
        bots.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(bots)
    }

    async fn delete(&self, id: &BotId) -> Result<(), DomainError> {
        if self.bots.write().unwrap().remove(id).is_none() {
            return Err(DomainError::new(
                ErrorCode::BotNotFound,
                format!("bot {} not found", id),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bot::BotKind;

    fn bot(project_id: ProjectId) -> Bot {
        Bot::new(BotId::new(), project_id, "Tuner", BotKind::Interview).unwrap()
    }

    #[tokio::test]
    async fn save_and_find_round_trip() {
        let repo = InMemoryBotRepository::new();
        let b = bot(ProjectId::new());
        repo.save(&b).await.unwrap();
        assert_eq!(repo.find_by_id(&b.id()).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn update_missing_bot_fails() {
        let repo = InMemoryBotRepository::new();
        let b = bot(ProjectId::new());
        let err = repo.update(&b).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BotNotFound);
    }

    #[tokio::test]
    async fn list_filters_by_project() {
        let repo = InMemoryBotRepository::new();
        let project = ProjectId::new();
        repo.save(&bot(project)).await.unwrap();
        repo.save(&bot(ProjectId::new())).await.unwrap();
        assert_eq!(repo.list_by_project(&project).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn kb_enabled_listing_skips_disabled_bots() {
        let repo = InMemoryBotRepository::new();
        let mut enabled = bot(ProjectId::new());
        enabled.set_kb_enabled(true);
        repo.save(&enabled).await.unwrap();
        repo.save(&bot(ProjectId::new())).await.unwrap();

        let listed = repo.list_kb_enabled().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), enabled.id());
    }

    #[tokio::test]
    async fn delete_removes_bot() {
        let repo = InMemoryBotRepository::new();
        let b = bot(ProjectId::new());
        repo.save(&b).await.unwrap();
        repo.delete(&b.id()).await.unwrap();
        assert!(repo.find_by_id(&b.id()).await.unwrap().is_none());
    }
}
