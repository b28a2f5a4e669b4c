//! ListBotsHandler - List a project's bots.

use std::sync::Arc;

use crate::domain::bot::Bot;
use crate::domain::foundation::{DomainError, ProjectId};
use crate::ports::BotRepository;

/// Query for a project's bots.
#[derive(Debug, Clone)]
pub struct ListBotsQuery {
    pub project_id: ProjectId,
}

/// Handler for bot listing.
pub struct ListBotsHandler {
    bots: Arc<dyn BotRepository>,
}

impl ListBotsHandler {
    pub fn new(bots: Arc<dyn BotRepository>) -> Self {
        Self { bots }
    }

    pub async fn handle(&self, query: ListBotsQuery) -> Result<Vec<Bot>, DomainError> {
        self.bots.list_by_project(&query.project_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBotRepository;
    use crate::domain::bot::BotKind;
    use crate::domain::foundation::BotId;

    #[tokio::test]
    async fn lists_only_the_projects_bots() {
        let bots = Arc::new(InMemoryBotRepository::new());
        let project = ProjectId::new();
        for (name, pid) in [("A", project), ("B", project), ("C", ProjectId::new())] {
            bots.save(&Bot::new(BotId::new(), pid, name, BotKind::Chatbot).unwrap())
                .await
                .unwrap();
        }

        let listed = ListBotsHandler::new(bots)
            .handle(ListBotsQuery {
                project_id: project,
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
    }
}
