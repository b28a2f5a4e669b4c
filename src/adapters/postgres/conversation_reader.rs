//! PostgreSQL implementation of ConversationReader.
//!
//! Reads from the denormalized `conversation_summaries` table written by the
//! conversation pipelines when a session finishes.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, Timestamp};
use crate::domain::insights::{ConversationSource, ConversationSummary, ThemeMention};
use crate::ports::ConversationReader;

/// PostgreSQL implementation of ConversationReader.
#[derive(Clone)]
pub struct PostgresConversationReader {
    pool: PgPool,
}

impl PostgresConversationReader {
    /// Creates a new PostgresConversationReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationReader for PostgresConversationReader {
    async fn summaries_for_project(
        &self,
        project_id: &ProjectId,
        since: Timestamp,
    ) -> Result<Vec<ConversationSummary>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT project_id, source, started_at, duration_secs, completed,
                   sentiment, nps, themes
            FROM conversation_summaries
            WHERE project_id = $1 AND started_at >= $2
            ORDER BY started_at ASC
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(since.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to fetch conversation summaries: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_summary).collect()
    }
}

fn source_from_str(s: &str) -> Result<ConversationSource, DomainError> {
    match s {
        "chatbot" => Ok(ConversationSource::Chatbot),
        "interview" => Ok(ConversationSource::Interview),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("unknown conversation source in storage: {}", other),
        )),
    }
}

fn row_to_summary(row: sqlx::postgres::PgRow) -> Result<ConversationSummary, DomainError> {
    let source: String = row.get("source");
    let duration_secs: i32 = row.get("duration_secs");
    let nps: Option<i16> = row.get("nps");
    let themes: Vec<ThemeMention> = serde_json::from_value(row.get("themes")).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("failed to deserialize themes: {}", e),
        )
    })?;

    Ok(ConversationSummary {
        project_id: ProjectId::from_uuid(row.get("project_id")),
        source: source_from_str(&source)?,
        started_at: Timestamp::from_datetime(row.get("started_at")),
        duration_secs: duration_secs as u32,
        completed: row.get("completed"),
        sentiment: row.get::<f32, _>("sentiment"),
        nps: nps.map(|n| n as u8),
        themes,
    })
}
