//! RunKbGrowthHandler - Nightly knowledge-base growth run.
//!
//! For every bot with KB growth enabled, pulls candidates from each
//! registered source inside the lookback window and inserts them against the
//! deduplicating store. A failing source is logged and skipped; the run
//! continues with the remaining sources and bots, and the report says what
//! happened per source kind.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::knowledge::{KbEntry, SourceKind};
use crate::ports::{BotRepository, InsertOutcome, KnowledgeBaseStore, KnowledgeSource};

/// Command to run one growth pass.
#[derive(Debug, Clone)]
pub struct RunKbGrowthCommand {
    /// How many days back to look for new content.
    pub lookback_days: u32,
}

/// Per-source-kind tally for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceTally {
    /// Entries stored for the first time.
    pub ingested: u64,
    /// Duplicates skipped by the store.
    pub skipped: u64,
    /// Fetches that failed and were skipped.
    pub failures: u64,
}

/// Report for one growth run.
#[derive(Debug, Clone, Default)]
pub struct KbGrowthReport {
    pub bots_processed: usize,
    pub per_source: BTreeMap<&'static str, SourceTally>,
}

impl KbGrowthReport {
    /// Total entries stored across all sources.
    pub fn total_ingested(&self) -> u64 {
        self.per_source.values().map(|t| t.ingested).sum()
    }
}

/// Handler for the growth cron.
pub struct RunKbGrowthHandler {
    bots: Arc<dyn BotRepository>,
    sources: Vec<Arc<dyn KnowledgeSource>>,
    store: Arc<dyn KnowledgeBaseStore>,
}

impl RunKbGrowthHandler {
    pub fn new(
        bots: Arc<dyn BotRepository>,
        sources: Vec<Arc<dyn KnowledgeSource>>,
        store: Arc<dyn KnowledgeBaseStore>,
    ) -> Self {
        Self {
            bots,
            sources,
            store,
        }
    }

    pub async fn handle(&self, cmd: RunKbGrowthCommand) -> Result<KbGrowthReport, DomainError> {
        let since = Timestamp::days_ago(cmd.lookback_days as i64);
        let bots = self.bots.list_kb_enabled().await?;

        let mut report = KbGrowthReport {
            bots_processed: bots.len(),
            ..Default::default()
        };
        for kind in SourceKind::ALL {
            report.per_source.insert(kind.as_str(), SourceTally::default());
        }

        for bot in &bots {
            for source in &self.sources {
                let kind = source.kind();
                let tally = report
                    .per_source
                    .entry(kind.as_str())
                    .or_default();

                let candidates = match source.fetch_since(&bot.id(), since).await {
                    Ok(candidates) => candidates,
                    Err(err) => {
                        tally.failures += 1;
                        tracing::warn!(
                            bot_id = %bot.id(),
                            source = kind.as_str(),
                            error = %err,
                            "knowledge source failed, skipping"
                        );
                        continue;
                    }
                };

                for candidate in candidates {
                    let entry = KbEntry::from_candidate(candidate);
                    match self.store.insert_if_absent(&entry).await? {
                        InsertOutcome::Inserted => tally.ingested += 1,
                        InsertOutcome::Duplicate => tally.skipped += 1,
                    }
                }
            }
        }

        tracing::info!(
            bots = report.bots_processed,
            ingested = report.total_ingested(),
            "kb growth run finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        FixedKnowledgeSource, InMemoryBotRepository, InMemoryKnowledgeBase,
    };
    use crate::domain::bot::{Bot, BotKind};
    use crate::domain::foundation::{BotId, ProjectId};
    use crate::domain::knowledge::CandidateEntry;

    async fn kb_bot(bots: &InMemoryBotRepository) -> BotId {
        let mut bot = Bot::new(BotId::new(), ProjectId::new(), "Tuner", BotKind::Chatbot).unwrap();
        bot.set_kb_enabled(true);
        bots.save(&bot).await.unwrap();
        bot.id()
    }

    fn candidate(bot_id: BotId, source: SourceKind, content: &str) -> CandidateEntry {
        CandidateEntry {
            bot_id,
            source,
            title: "entry".to_string(),
            content: content.to_string(),
            captured_at: Timestamp::days_ago(1),
        }
    }

    #[tokio::test]
    async fn ingests_fresh_candidates_and_skips_duplicates() {
        let bots = Arc::new(InMemoryBotRepository::new());
        let bot_id = kb_bot(&bots).await;
        let store = Arc::new(InMemoryKnowledgeBase::new());

        let source = Arc::new(FixedKnowledgeSource::new(SourceKind::WordpressContent));
        source.push_candidate(candidate(bot_id, SourceKind::WordpressContent, "pagina uno"));
        source.push_candidate(candidate(bot_id, SourceKind::WordpressContent, "pagina uno"));
        source.push_candidate(candidate(bot_id, SourceKind::WordpressContent, "pagina due"));

        let handler = RunKbGrowthHandler::new(bots, vec![source], store.clone());
        let report = handler
            .handle(RunKbGrowthCommand { lookback_days: 7 })
            .await
            .unwrap();

        let tally = report.per_source["wordpress_content"];
        assert_eq!(tally.ingested, 2);
        assert_eq!(tally.skipped, 1);
        assert_eq!(store.count_for_bot(&bot_id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn rerun_is_idempotent() {
        let bots = Arc::new(InMemoryBotRepository::new());
        let bot_id = kb_bot(&bots).await;
        let store = Arc::new(InMemoryKnowledgeBase::new());

        let source = Arc::new(FixedKnowledgeSource::new(SourceKind::InterviewTranscript));
        source.push_candidate(candidate(
            bot_id,
            SourceKind::InterviewTranscript,
            "trascrizione",
        ));

        let handler = RunKbGrowthHandler::new(bots, vec![source], store.clone());
        handler
            .handle(RunKbGrowthCommand { lookback_days: 7 })
            .await
            .unwrap();
        let second = handler
            .handle(RunKbGrowthCommand { lookback_days: 7 })
            .await
            .unwrap();

        assert_eq!(second.total_ingested(), 0);
        assert_eq!(store.count_for_bot(&bot_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn failing_source_is_skipped_not_fatal() {
        let bots = Arc::new(InMemoryBotRepository::new());
        let bot_id = kb_bot(&bots).await;
        let store = Arc::new(InMemoryKnowledgeBase::new());

        let broken = Arc::new(FixedKnowledgeSource::new(SourceKind::WoocommerceProduct));
        broken.set_failing(true);
        let healthy = Arc::new(FixedKnowledgeSource::new(SourceKind::WordpressContent));
        healthy.push_candidate(candidate(bot_id, SourceKind::WordpressContent, "pagina"));

        let handler = RunKbGrowthHandler::new(bots, vec![broken, healthy], store);
        let report = handler
            .handle(RunKbGrowthCommand { lookback_days: 7 })
            .await
            .unwrap();

        assert_eq!(report.per_source["woocommerce_product"].failures, 1);
        assert_eq!(report.per_source["wordpress_content"].ingested, 1);
    }

    #[tokio::test]
    async fn disabled_bots_are_not_processed() {
        let bots = Arc::new(InMemoryBotRepository::new());
        let bot = Bot::new(BotId::new(), ProjectId::new(), "Off", BotKind::Chatbot).unwrap();
        bots.save(&bot).await.unwrap();

        let source = Arc::new(FixedKnowledgeSource::new(SourceKind::ChatbotConversation));
        source.push_candidate(candidate(
            bot.id(),
            SourceKind::ChatbotConversation,
            "dialogo",
        ));

        let handler = RunKbGrowthHandler::new(
            bots,
            vec![source],
            Arc::new(InMemoryKnowledgeBase::new()),
        );
        let report = handler
            .handle(RunKbGrowthCommand { lookback_days: 7 })
            .await
            .unwrap();

        assert_eq!(report.bots_processed, 0);
        assert_eq!(report.total_ingested(), 0);
    }
}
