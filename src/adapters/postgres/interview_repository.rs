//! PostgreSQL implementation of InterviewRepository.
//!
//! The plan snapshot, transcript, and topic results are stored as JSONB;
//! they are only ever read back whole, so no relational decomposition is
//! needed.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{BotId, DomainError, ErrorCode, InterviewId, Timestamp};
use crate::domain::interview::{InterviewMessage, InterviewPhase, InterviewSession, TopicResult};
use crate::domain::plan::InterviewPlan;
use crate::ports::InterviewRepository;

/// PostgreSQL implementation of InterviewRepository.
#[derive(Clone)]
pub struct PostgresInterviewRepository {
    pool: PgPool,
}

impl PostgresInterviewRepository {
    /// Creates a new PostgresInterviewRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewRepository for PostgresInterviewRepository {
    async fn save(&self, session: &InterviewSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO interviews (
                id, bot_id, plan, phase, topic_index, turns_in_topic,
                results, messages, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.bot_id().as_uuid())
        .bind(to_json(session.plan())?)
        .bind(phase_to_str(session.phase()))
        .bind(session.topic_index() as i32)
        .bind(session.turns_in_topic() as i32)
        .bind(to_json(&session.results())?)
        .bind(to_json(&session.messages())?)
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to insert interview: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, session: &InterviewSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE interviews SET
                plan = $2,
                phase = $3,
                topic_index = $4,
                turns_in_topic = $5,
                results = $6,
                messages = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(to_json(session.plan())?)
        .bind(phase_to_str(session.phase()))
        .bind(session.topic_index() as i32)
        .bind(session.turns_in_topic() as i32)
        .bind(to_json(&session.results())?)
        .bind(to_json(&session.messages())?)
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to update interview: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::InterviewNotFound,
                format!("interview not found: {}", session.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &InterviewId) -> Result<Option<InterviewSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, bot_id, plan, phase, topic_index, turns_in_topic,
                   results, messages, created_at, updated_at
            FROM interviews
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to fetch interview: {}", e),
            )
        })?;

        row.map(row_to_session).transpose()
    }

    async fn list_by_bot(&self, bot_id: &BotId) -> Result<Vec<InterviewSession>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, bot_id, plan, phase, topic_index, turns_in_topic,
                   results, messages, created_at, updated_at
            FROM interviews
            WHERE bot_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(bot_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to list interviews: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_session).collect()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("failed to serialize interview field: {}", e),
        )
    })
}

fn from_json<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    field: &str,
) -> Result<T, DomainError> {
    serde_json::from_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("failed to deserialize interview {}: {}", field, e),
        )
    })
}

fn phase_to_str(phase: InterviewPhase) -> &'static str {
    match phase {
        InterviewPhase::Pending => "pending",
        InterviewPhase::Started => "started",
        InterviewPhase::Explaining => "explaining",
        InterviewPhase::Quiz => "quiz",
        InterviewPhase::Evaluated => "evaluated",
        InterviewPhase::Completed => "completed",
    }
}

fn phase_from_str(s: &str) -> Result<InterviewPhase, DomainError> {
    match s {
        "pending" => Ok(InterviewPhase::Pending),
        "started" => Ok(InterviewPhase::Started),
        "explaining" => Ok(InterviewPhase::Explaining),
        "quiz" => Ok(InterviewPhase::Quiz),
        "evaluated" => Ok(InterviewPhase::Evaluated),
        "completed" => Ok(InterviewPhase::Completed),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("unknown interview phase in storage: {}", other),
        )),
    }
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<InterviewSession, DomainError> {
    let phase: String = row.get("phase");
    let topic_index: i32 = row.get("topic_index");
    let turns_in_topic: i32 = row.get("turns_in_topic");
    let plan: InterviewPlan = from_json(row.get("plan"), "plan")?;
    let results: Vec<TopicResult> = from_json(row.get("results"), "results")?;
    let messages: Vec<InterviewMessage> = from_json(row.get("messages"), "messages")?;

    Ok(InterviewSession::restore(
        InterviewId::from_uuid(row.get("id")),
        BotId::from_uuid(row.get("bot_id")),
        plan,
        phase_from_str(&phase)?,
        topic_index as usize,
        turns_in_topic as u32,
        results,
        messages,
        Timestamp::from_datetime(row.get("created_at")),
        Timestamp::from_datetime(row.get("updated_at")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_mapping_round_trips() {
        for phase in [
            InterviewPhase::Pending,
            InterviewPhase::Started,
            InterviewPhase::Explaining,
            InterviewPhase::Quiz,
            InterviewPhase::Evaluated,
            InterviewPhase::Completed,
        ] {
            assert_eq!(phase_from_str(phase_to_str(phase)).unwrap(), phase);
        }
    }

    #[test]
    fn unknown_phase_is_rejected() {
        assert!(phase_from_str("paused").is_err());
    }
}
