//! In-memory knowledge-base store for tests and local development.
//!
//! Mirrors the database unique constraint with a key set over
//! `(bot_id, source, content_hash)`.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::RwLock;

use crate::domain::foundation::{BotId, DomainError};
use crate::domain::knowledge::{KbEntry, SourceKind};
use crate::ports::{InsertOutcome, KnowledgeBaseStore};

/// HashSet-backed implementation of `KnowledgeBaseStore`.
#[derive(Default)]
pub struct InMemoryKnowledgeBase {
    keys: RwLock<HashSet<(BotId, SourceKind, String)>>,
    entries: RwLock<Vec<KbEntry>>,
}

impl InMemoryKnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of every stored entry, in insertion order.
    pub fn entries(&self) -> Vec<KbEntry> {
        self.entries.read().unwrap().clone()
    }
}

#[async_trait]
impl KnowledgeBaseStore for InMemoryKnowledgeBase {
    async fn insert_if_absent(&self, entry: &KbEntry) -> Result<InsertOutcome, DomainError> {
        let key = (entry.bot_id, entry.source, entry.content_hash.clone());
        let mut keys = self.keys.write().unwrap();
        if !keys.insert(key) {
            return Ok(InsertOutcome::Duplicate);
        }
        self.entries.write().unwrap().push(entry.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn count_for_bot(&self, bot_id: &BotId) -> Result<u64, DomainError> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.bot_id == *bot_id)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::knowledge::CandidateEntry;

    fn entry(bot_id: BotId, content: &str) -> KbEntry {
        KbEntry::from_candidate(CandidateEntry {
            bot_id,
            source: SourceKind::WordpressContent,
            title: "Pricing".to_string(),
            content: content.to_string(),
            captured_at: Timestamp::now(),
        })
    }

    #[tokio::test]
    async fn duplicate_insert_is_reported_not_errored() {
        let store = InMemoryKnowledgeBase::new();
        let bot = BotId::new();
        let e = entry(bot, "Our pricing starts at 29 euro.");

        assert_eq!(
            store.insert_if_absent(&e).await.unwrap(),
            InsertOutcome::Inserted
        );
        assert_eq!(
            store.insert_if_absent(&e).await.unwrap(),
            InsertOutcome::Duplicate
        );
        assert_eq!(store.count_for_bot(&bot).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn reformatted_content_dedups() {
        let store = InMemoryKnowledgeBase::new();
        let bot = BotId::new();
        store
            .insert_if_absent(&entry(bot, "hello  world"))
            .await
            .unwrap();
        let outcome = store
            .insert_if_absent(&entry(bot, "hello\nworld"))
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Duplicate);
    }

    #[tokio::test]
    async fn same_content_different_bots_both_insert() {
        let store = InMemoryKnowledgeBase::new();
        let content = "shared answer";
        store
            .insert_if_absent(&entry(BotId::new(), content))
            .await
            .unwrap();
        let outcome = store
            .insert_if_absent(&entry(BotId::new(), content))
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted);
    }
}
