//! PostgreSQL implementation of KnowledgeBaseStore.
//!
//! Deduplication rides on the unique constraint over
//! `(bot_id, source, content_hash)`; `ON CONFLICT DO NOTHING` turns duplicate
//! inserts into a zero-row result instead of an error.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{BotId, DomainError, ErrorCode};
use crate::domain::knowledge::KbEntry;
use crate::ports::{InsertOutcome, KnowledgeBaseStore};

/// PostgreSQL implementation of KnowledgeBaseStore.
#[derive(Clone)]
pub struct PostgresKnowledgeBase {
    pool: PgPool,
}

impl PostgresKnowledgeBase {
    /// Creates a new PostgresKnowledgeBase.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KnowledgeBaseStore for PostgresKnowledgeBase {
    async fn insert_if_absent(&self, entry: &KbEntry) -> Result<InsertOutcome, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO kb_entries (
                bot_id, source, title, content, content_hash, captured_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (bot_id, source, content_hash) DO NOTHING
            "#,
        )
        .bind(entry.bot_id.as_uuid())
        .bind(entry.source.as_str())
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(&entry.content_hash)
        .bind(entry.captured_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to insert kb entry: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            Ok(InsertOutcome::Duplicate)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }

    async fn count_for_bot(&self, bot_id: &BotId) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM kb_entries WHERE bot_id = $1")
            .bind(bot_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("failed to count kb entries: {}", e),
                )
            })?;

        Ok(result.0 as u64)
    }
}
