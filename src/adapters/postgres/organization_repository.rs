//! PostgreSQL implementation of OrganizationRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, OrganizationId, Timestamp};
use crate::domain::organization::Organization;
use crate::ports::OrganizationRepository;

/// PostgreSQL implementation of OrganizationRepository.
#[derive(Clone)]
pub struct PostgresOrganizationRepository {
    pool: PgPool,
}

impl PostgresOrganizationRepository {
    /// Creates a new PostgresOrganizationRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationRepository for PostgresOrganizationRepository {
    async fn save(&self, organization: &Organization) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO organizations (id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(organization.id().as_uuid())
        .bind(organization.name())
        .bind(organization.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("failed to insert organization: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, DomainError> {
        let row = sqlx::query("SELECT id, name, created_at FROM organizations WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("failed to fetch organization: {}", e),
                )
            })?;

        Ok(row.map(row_to_organization))
    }

    async fn list(&self) -> Result<Vec<Organization>, DomainError> {
        let rows =
            sqlx::query("SELECT id, name, created_at FROM organizations ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("failed to list organizations: {}", e),
                    )
                })?;

        Ok(rows.into_iter().map(row_to_organization).collect())
    }
}

fn row_to_organization(row: sqlx::postgres::PgRow) -> Organization {
    Organization::restore(
        OrganizationId::from_uuid(row.get("id")),
        row.get("name"),
        Timestamp::from_datetime(row.get("created_at")),
    )
}
