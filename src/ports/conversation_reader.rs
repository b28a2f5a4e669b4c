//! Conversation reader port (read side).
//!
//! Query-only access to finished-conversation summaries for the analytics
//! engine. Summaries are denormalized at write time by the conversation
//! pipelines; this port never touches live sessions.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProjectId, Timestamp};
use crate::domain::insights::ConversationSummary;

/// Read-side port for conversation summaries.
#[async_trait]
pub trait ConversationReader: Send + Sync {
    /// Load summaries for a project with `started_at >= since`, oldest first.
    async fn summaries_for_project(
        &self,
        project_id: &ProjectId,
        since: Timestamp,
    ) -> Result<Vec<ConversationSummary>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ConversationReader) {}
    }
}
