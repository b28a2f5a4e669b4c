//! Scripted knowledge source for tests.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{BotId, Timestamp};
use crate::domain::knowledge::{CandidateEntry, SourceKind};
use crate::ports::{KnowledgeSource, SourceError};

/// Fixed-candidate implementation of `KnowledgeSource`.
///
/// Returns the seeded candidates for every bot, filtered by `since`; can be
/// switched to fail to exercise the cron's skip-and-continue path.
pub struct FixedKnowledgeSource {
    kind: SourceKind,
    candidates: RwLock<Vec<CandidateEntry>>,
    failing: RwLock<bool>,
}

impl FixedKnowledgeSource {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            candidates: RwLock::new(Vec::new()),
            failing: RwLock::new(false),
        }
    }

    /// Seeds a candidate.
    pub fn push_candidate(&self, candidate: CandidateEntry) {
        self.candidates.write().unwrap().push(candidate);
    }

    /// Makes every subsequent fetch fail with `Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.write().unwrap() = failing;
    }
}

#[async_trait]
impl KnowledgeSource for FixedKnowledgeSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch_since(
        &self,
        bot_id: &BotId,
        since: Timestamp,
    ) -> Result<Vec<CandidateEntry>, SourceError> {
        if *self.failing.read().unwrap() {
            return Err(SourceError::unavailable("scripted outage"));
        }
        Ok(self
            .candidates
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.bot_id == *bot_id && c.captured_at >= since)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(bot_id: BotId, captured_at: Timestamp) -> CandidateEntry {
        CandidateEntry {
            bot_id,
            source: SourceKind::ChatbotConversation,
            title: "Transcript".to_string(),
            content: "Q: orari? A: 9-18".to_string(),
            captured_at,
        }
    }

    #[tokio::test]
    async fn filters_by_bot_and_cutoff() {
        let source = FixedKnowledgeSource::new(SourceKind::ChatbotConversation);
        let bot = BotId::new();
        source.push_candidate(candidate(bot, Timestamp::days_ago(1)));
        source.push_candidate(candidate(bot, Timestamp::days_ago(10)));
        source.push_candidate(candidate(BotId::new(), Timestamp::days_ago(1)));

        let found = source
            .fetch_since(&bot, Timestamp::days_ago(7))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn failing_source_errors() {
        let source = FixedKnowledgeSource::new(SourceKind::WordpressContent);
        source.set_failing(true);
        let result = source.fetch_since(&BotId::new(), Timestamp::days_ago(7)).await;
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }
}
