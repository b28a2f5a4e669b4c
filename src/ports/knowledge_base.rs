//! Knowledge-base store port.
//!
//! Write side of the KB growth pipeline. Deduplication lives in the store:
//! the `(bot_id, source, content_hash)` key is unique and duplicate inserts
//! are reported, not errored, so re-running the cron is idempotent.

use async_trait::async_trait;

use crate::domain::foundation::{BotId, DomainError};
use crate::domain::knowledge::KbEntry;

/// Outcome of a single insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The entry was new and has been stored.
    Inserted,
    /// An entry with the same `(bot_id, source, content_hash)` already exists.
    Duplicate,
}

/// Storage port for knowledge-base entries.
#[async_trait]
pub trait KnowledgeBaseStore: Send + Sync {
    /// Insert an entry unless an identical one already exists.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert_if_absent(&self, entry: &KbEntry) -> Result<InsertOutcome, DomainError>;

    /// Count stored entries for a bot.
    async fn count_for_bot(&self, bot_id: &BotId) -> Result<u64, DomainError>;
}
