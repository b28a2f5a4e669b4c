//! Integration tests for the knowledge-base growth run.
//!
//! Exercises the cron handler against in-memory adapters: multi-bot runs,
//! hash-based dedup across reruns, and per-source failure isolation.

use std::sync::Arc;

use business_tuner::adapters::memory::{
    FixedKnowledgeSource, InMemoryBotRepository, InMemoryKnowledgeBase,
};
use business_tuner::application::handlers::kb_growth::{RunKbGrowthCommand, RunKbGrowthHandler};
use business_tuner::domain::bot::{Bot, BotKind};
use business_tuner::domain::foundation::{BotId, ProjectId, Timestamp};
use business_tuner::domain::knowledge::{CandidateEntry, SourceKind};
use business_tuner::ports::{BotRepository, KnowledgeBaseStore};

async fn kb_enabled_bot(bots: &InMemoryBotRepository, name: &str) -> BotId {
    let mut bot = Bot::new(BotId::new(), ProjectId::new(), name, BotKind::Chatbot).unwrap();
    bot.set_kb_enabled(true);
    bots.save(&bot).await.unwrap();
    bot.id()
}

fn candidate(bot_id: BotId, source: SourceKind, content: &str) -> CandidateEntry {
    CandidateEntry {
        bot_id,
        source,
        title: "voce".to_string(),
        content: content.to_string(),
        captured_at: Timestamp::days_ago(2),
    }
}

#[tokio::test]
async fn growth_run_ingests_across_bots_and_sources() {
    let bots = Arc::new(InMemoryBotRepository::new());
    let bot_a = kb_enabled_bot(&bots, "Negozio").await;
    let bot_b = kb_enabled_bot(&bots, "Ristorante").await;
    let store = Arc::new(InMemoryKnowledgeBase::new());

    let wordpress = Arc::new(FixedKnowledgeSource::new(SourceKind::WordpressContent));
    wordpress.push_candidate(candidate(bot_a, SourceKind::WordpressContent, "chi siamo"));
    wordpress.push_candidate(candidate(bot_b, SourceKind::WordpressContent, "il menu"));

    let products = Arc::new(FixedKnowledgeSource::new(SourceKind::WoocommerceProduct));
    products.push_candidate(candidate(bot_a, SourceKind::WoocommerceProduct, "borsa in pelle"));

    let handler = RunKbGrowthHandler::new(bots, vec![wordpress, products], store.clone());
    let report = handler
        .handle(RunKbGrowthCommand { lookback_days: 7 })
        .await
        .unwrap();

    assert_eq!(report.bots_processed, 2);
    assert_eq!(report.per_source["wordpress_content"].ingested, 2);
    assert_eq!(report.per_source["woocommerce_product"].ingested, 1);
    assert_eq!(store.count_for_bot(&bot_a).await.unwrap(), 2);
    assert_eq!(store.count_for_bot(&bot_b).await.unwrap(), 1);
}

#[tokio::test]
async fn rerun_skips_everything_already_stored() {
    let bots = Arc::new(InMemoryBotRepository::new());
    let bot_id = kb_enabled_bot(&bots, "Negozio").await;
    let store = Arc::new(InMemoryKnowledgeBase::new());

    let source = Arc::new(FixedKnowledgeSource::new(SourceKind::ChatbotConversation));
    source.push_candidate(candidate(
        bot_id,
        SourceKind::ChatbotConversation,
        "domanda sulle spedizioni",
    ));

    let handler = RunKbGrowthHandler::new(bots, vec![source], store.clone());
    let first = handler
        .handle(RunKbGrowthCommand { lookback_days: 7 })
        .await
        .unwrap();
    let second = handler
        .handle(RunKbGrowthCommand { lookback_days: 7 })
        .await
        .unwrap();

    assert_eq!(first.total_ingested(), 1);
    assert_eq!(second.total_ingested(), 0);
    assert_eq!(second.per_source["chatbot_conversation"].skipped, 1);
    assert_eq!(store.count_for_bot(&bot_id).await.unwrap(), 1);
}

#[tokio::test]
async fn one_broken_source_does_not_stop_the_run() {
    let bots = Arc::new(InMemoryBotRepository::new());
    let bot_id = kb_enabled_bot(&bots, "Negozio").await;
    let store = Arc::new(InMemoryKnowledgeBase::new());

    let broken = Arc::new(FixedKnowledgeSource::new(SourceKind::InterviewTranscript));
    broken.set_failing(true);
    let healthy = Arc::new(FixedKnowledgeSource::new(SourceKind::WordpressContent));
    healthy.push_candidate(candidate(bot_id, SourceKind::WordpressContent, "novità"));

    let report = RunKbGrowthHandler::new(bots, vec![broken, healthy], store)
        .handle(RunKbGrowthCommand { lookback_days: 7 })
        .await
        .unwrap();

    assert_eq!(report.per_source["interview_transcript"].failures, 1);
    assert_eq!(report.per_source["wordpress_content"].ingested, 1);
}
