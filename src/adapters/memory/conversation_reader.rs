//! In-memory conversation reader for tests and local development.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ProjectId, Timestamp};
use crate::domain::insights::ConversationSummary;
use crate::ports::ConversationReader;

/// Vec-backed implementation of `ConversationReader`.
#[derive(Default)]
pub struct InMemoryConversationReader {
    summaries: RwLock<Vec<ConversationSummary>>,
}

impl InMemoryConversationReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a summary.
    pub fn push_summary(&self, summary: ConversationSummary) {
        self.summaries.write().unwrap().push(summary);
    }
}

#[async_trait]
impl ConversationReader for InMemoryConversationReader {
    async fn summaries_for_project(
        &self,
        project_id: &ProjectId,
        since: Timestamp,
    ) -> Result<Vec<ConversationSummary>, DomainError> {
        let mut matching: Vec<ConversationSummary> = self
            .summaries
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.project_id == *project_id && s.started_at >= since)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.started_at.cmp(&b.started_at));
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::insights::ConversationSource;

    fn summary(project_id: ProjectId, started_at: Timestamp) -> ConversationSummary {
        ConversationSummary {
            project_id,
            source: ConversationSource::Chatbot,
            started_at,
            duration_secs: 120,
            completed: true,
            sentiment: 0.4,
            nps: None,
            themes: Vec::new(),
        }
    }

    #[tokio::test]
    async fn filters_by_project_and_window() {
        let reader = InMemoryConversationReader::new();
        let project = ProjectId::new();
        reader.push_summary(summary(project, Timestamp::days_ago(2)));
        reader.push_summary(summary(project, Timestamp::days_ago(40)));
        reader.push_summary(summary(ProjectId::new(), Timestamp::days_ago(2)));

        let found = reader
            .summaries_for_project(&project, Timestamp::days_ago(30))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }
}
