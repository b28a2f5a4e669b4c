//! GetInterviewHandler - Fetch one interview session.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, InterviewId};
use crate::domain::interview::InterviewSession;
use crate::ports::InterviewRepository;

/// Query for a single interview.
#[derive(Debug, Clone)]
pub struct GetInterviewQuery {
    pub interview_id: InterviewId,
}

/// Error type for fetching interviews.
#[derive(Debug, Clone)]
pub enum GetInterviewError {
    /// Interview not found.
    NotFound(InterviewId),
    /// Domain error from the repository.
    Domain(DomainError),
}

impl std::fmt::Display for GetInterviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetInterviewError::NotFound(id) => write!(f, "Interview not found: {}", id),
            GetInterviewError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetInterviewError {}

impl From<DomainError> for GetInterviewError {
    fn from(err: DomainError) -> Self {
        GetInterviewError::Domain(err)
    }
}

/// Handler for fetching interviews.
pub struct GetInterviewHandler {
    interviews: Arc<dyn InterviewRepository>,
}

impl GetInterviewHandler {
    pub fn new(interviews: Arc<dyn InterviewRepository>) -> Self {
        Self { interviews }
    }

    pub async fn handle(
        &self,
        query: GetInterviewQuery,
    ) -> Result<InterviewSession, GetInterviewError> {
        self.interviews
            .find_by_id(&query.interview_id)
            .await?
            .ok_or(GetInterviewError::NotFound(query.interview_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryInterviewRepository;
    use crate::domain::foundation::BotId;
    use crate::domain::plan::PlanBuilder;

    #[tokio::test]
    async fn returns_stored_session() {
        let interviews = Arc::new(InMemoryInterviewRepository::new());
        let plan = PlanBuilder::new(10, 60)
            .with_scan_topic("attivita", "Attività")
            .build()
            .unwrap();
        let session = InterviewSession::new(InterviewId::new(), BotId::new(), plan);
        interviews.save(&session).await.unwrap();

        let found = GetInterviewHandler::new(interviews)
            .handle(GetInterviewQuery {
                interview_id: session.id(),
            })
            .await
            .unwrap();
        assert_eq!(found.id(), session.id());
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let handler = GetInterviewHandler::new(Arc::new(InMemoryInterviewRepository::new()));
        let result = handler
            .handle(GetInterviewQuery {
                interview_id: InterviewId::new(),
            })
            .await;
        assert!(matches!(result, Err(GetInterviewError::NotFound(_))));
    }
}
