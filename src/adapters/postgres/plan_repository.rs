//! PostgreSQL implementation of PlanRepository.
//!
//! One row per bot for the base plan and one for the override set, both
//! stored as JSONB and replaced wholesale on write.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{BotId, DomainError, ErrorCode};
use crate::domain::plan::{InterviewPlan, PlanOverrides};
use crate::ports::PlanRepository;

/// PostgreSQL implementation of PlanRepository.
#[derive(Clone)]
pub struct PostgresPlanRepository {
    pool: PgPool,
}

impl PostgresPlanRepository {
    /// Creates a new PostgresPlanRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PostgresPlanRepository {
    async fn save_base_plan(
        &self,
        bot_id: &BotId,
        plan: &InterviewPlan,
    ) -> Result<(), DomainError> {
        let plan_json = serde_json::to_value(plan).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to serialize plan: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO interview_plans (bot_id, plan, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (bot_id) DO UPDATE SET plan = $2, updated_at = NOW()
            "#,
        )
        .bind(bot_id.as_uuid())
        .bind(plan_json)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to store base plan: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_base_plan(&self, bot_id: &BotId) -> Result<Option<InterviewPlan>, DomainError> {
        let row = sqlx::query("SELECT plan FROM interview_plans WHERE bot_id = $1")
            .bind(bot_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("failed to fetch base plan: {}", e),
                )
            })?;

        row.map(|row| {
            serde_json::from_value(row.get("plan")).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("failed to deserialize plan: {}", e),
                )
            })
        })
        .transpose()
    }

    async fn save_overrides(
        &self,
        bot_id: &BotId,
        overrides: &PlanOverrides,
    ) -> Result<(), DomainError> {
        let overrides_json = serde_json::to_value(overrides).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to serialize overrides: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO plan_overrides (bot_id, overrides, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (bot_id) DO UPDATE SET overrides = $2, updated_at = NOW()
            "#,
        )
        .bind(bot_id.as_uuid())
        .bind(overrides_json)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to store overrides: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_overrides(&self, bot_id: &BotId) -> Result<PlanOverrides, DomainError> {
        let row = sqlx::query("SELECT overrides FROM plan_overrides WHERE bot_id = $1")
            .bind(bot_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("failed to fetch overrides: {}", e),
                )
            })?;

        match row {
            Some(row) => serde_json::from_value(row.get("overrides")).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("failed to deserialize overrides: {}", e),
                )
            }),
            None => Ok(PlanOverrides::default()),
        }
    }
}
