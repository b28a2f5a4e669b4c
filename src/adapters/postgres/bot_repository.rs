//! PostgreSQL implementation of BotRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::bot::{Bot, BotKind};
use crate::domain::foundation::{BotId, DomainError, ErrorCode, ProjectId, Timestamp};
use crate::ports::BotRepository;

/// PostgreSQL implementation of BotRepository.
#[derive(Clone)]
pub struct PostgresBotRepository {
    pool: PgPool,
}

impl PostgresBotRepository {
    /// Creates a new PostgresBotRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BotRepository for PostgresBotRepository {
    async fn save(&self, bot: &Bot) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO bots (
                id, project_id, name, kind, kb_enabled, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(bot.id().as_uuid())
        .bind(bot.project_id().as_uuid())
        .bind(bot.name())
        .bind(bot_kind_to_str(bot.kind()))
        .bind(bot.kb_enabled())
        .bind(bot.created_at().as_datetime())
        .bind(bot.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to insert bot: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, bot: &Bot) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE bots SET
                name = $2,
                kind = $3,
                kb_enabled = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(bot.id().as_uuid())
        .bind(bot.name())
        .bind(bot_kind_to_str(bot.kind()))
        .bind(bot.kb_enabled())
        .bind(bot.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to update bot: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::BotNotFound,
                format!("bot not found: {}", bot.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &BotId) -> Result<Option<Bot>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, name, kind, kb_enabled, created_at, updated_at
            FROM bots
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to fetch bot: {}", e),
            )
        })?;

        row.map(row_to_bot).transpose()
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> Result<Vec<Bot>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, project_id, name, kind, kb_enabled, created_at, updated_at
            FROM bots
            WHERE project_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to list bots: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_bot).collect()
    }

    async fn list_kb_enabled(&self) -> Result<Vec<Bot>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, project_id, name, kind, kb_enabled, created_at, updated_at
            FROM bots
            WHERE kb_enabled = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to list kb-enabled bots: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_bot).collect()
    }

    async fn delete(&self, id: &BotId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM bots WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("failed to delete bot: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::BotNotFound,
                format!("bot not found: {}", id),
            ));
        }

        Ok(())
    }
}

fn bot_kind_to_str(kind: BotKind) -> &'static str {
    match kind {
        BotKind::Chatbot => "chatbot",
        BotKind::Interview => "interview",
    }
}

fn bot_kind_from_str(s: &str) -> Result<BotKind, DomainError> {
    match s {
        "chatbot" => Ok(BotKind::Chatbot),
        "interview" => Ok(BotKind::Interview),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("unknown bot kind in storage: {}", other),
        )),
    }
}

fn row_to_bot(row: sqlx::postgres::PgRow) -> Result<Bot, DomainError> {
    let kind: String = row.get("kind");
    Ok(Bot::restore(
        BotId::from_uuid(row.get("id")),
        ProjectId::from_uuid(row.get("project_id")),
        row.get("name"),
        bot_kind_from_str(&kind)?,
        row.get("kb_enabled"),
        Timestamp::from_datetime(row.get("created_at")),
        Timestamp::from_datetime(row.get("updated_at")),
    ))
}
