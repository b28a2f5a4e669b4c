//! Interview session repository port (write side).
//!
//! The session aggregate owns its plan snapshot, messages, and topic results,
//! so persistence is whole-aggregate: load, mutate in memory, store back.

use async_trait::async_trait;

use crate::domain::foundation::{BotId, DomainError, InterviewId};
use crate::domain::interview::InterviewSession;

/// Repository port for InterviewSession aggregate persistence.
///
/// Implementations must persist the full aggregate (plan snapshot, phase,
/// cursor, messages, results) atomically.
#[async_trait]
pub trait InterviewRepository: Send + Sync {
    /// Save a new interview session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &InterviewSession) -> Result<(), DomainError>;

    /// Update an existing interview session.
    ///
    /// Replaces the stored aggregate with the given one.
    ///
    /// # Errors
    ///
    /// - `InterviewNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &InterviewSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns the full aggregate including messages. Returns `None` if not
    /// found.
    async fn find_by_id(&self, id: &InterviewId) -> Result<Option<InterviewSession>, DomainError>;

    /// List sessions for a bot, newest first.
    async fn list_by_bot(&self, bot_id: &BotId) -> Result<Vec<InterviewSession>, DomainError>;
}
