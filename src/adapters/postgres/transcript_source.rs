//! PostgreSQL-backed knowledge source over stored transcripts.
//!
//! Chatbot and interview transcripts land in the `transcripts` table when a
//! conversation finishes; the growth cron reads them back through this
//! adapter. One instance covers one source kind.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{BotId, Timestamp};
use crate::domain::knowledge::{CandidateEntry, SourceKind};
use crate::ports::{KnowledgeSource, SourceError};

/// Transcript-table implementation of KnowledgeSource.
#[derive(Clone)]
pub struct PostgresTranscriptSource {
    pool: PgPool,
    kind: SourceKind,
}

impl PostgresTranscriptSource {
    /// Creates a source over chatbot conversation transcripts.
    pub fn chatbot(pool: PgPool) -> Self {
        Self {
            pool,
            kind: SourceKind::ChatbotConversation,
        }
    }

    /// Creates a source over interview transcripts.
    pub fn interview(pool: PgPool) -> Self {
        Self {
            pool,
            kind: SourceKind::InterviewTranscript,
        }
    }
}

#[async_trait]
impl KnowledgeSource for PostgresTranscriptSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch_since(
        &self,
        bot_id: &BotId,
        since: Timestamp,
    ) -> Result<Vec<CandidateEntry>, SourceError> {
        let rows = sqlx::query(
            r#"
            SELECT title, content, captured_at
            FROM transcripts
            WHERE bot_id = $1 AND source = $2 AND captured_at >= $3
            ORDER BY captured_at ASC
            "#,
        )
        .bind(bot_id.as_uuid())
        .bind(self.kind.as_str())
        .bind(since.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SourceError::unavailable(format!("transcript query failed: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| CandidateEntry {
                bot_id: *bot_id,
                source: self.kind,
                title: row.get("title"),
                content: row.get("content"),
                captured_at: Timestamp::from_datetime(row.get("captured_at")),
            })
            .collect())
    }
}
