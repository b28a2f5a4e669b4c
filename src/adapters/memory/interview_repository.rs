//! In-memory interview session repository for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{BotId, DomainError, ErrorCode, InterviewId};
use crate::domain::interview::InterviewSession;
use crate::ports::InterviewRepository;

/// HashMap-backed implementation of `InterviewRepository`.
#[derive(Default)]
pub struct InMemoryInterviewRepository {
    sessions: RwLock<HashMap<InterviewId, InterviewSession>>,
}

impl InMemoryInterviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InterviewRepository for InMemoryInterviewRepository {
    async fn save(&self, session: &InterviewSession) -> Result<(), DomainError> {
        self.sessions
            .write()
            .unwrap()
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &InterviewSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().unwrap();
        if !sessions.contains_key(&session.id()) {
            return Err(DomainError::new(
                ErrorCode::InterviewNotFound,
                format!("interview {} not found", session.id()),
            ));
        }
        sessions.insert(session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &InterviewId) -> Result<Option<InterviewSession>, DomainError> {
        Ok(self.sessions.read().unwrap().get(id).cloned())
    }

    async fn list_by_bot(&self, bot_id: &BotId) -> Result<Vec<InterviewSession>, DomainError> {
        let mut sessions: Vec<InterviewSession> = self
            .sessions
            .read()
            .unwrap()
            .values()
            .filter(|s| s.bot_id() == *bot_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(sessions)
    }
}
