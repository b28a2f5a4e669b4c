//! PostgreSQL implementation of SessionValidator.
//!
//! Sessions are minted by the auth frontend; this side only ever reads
//! them. Tokens are stored as sha256 digests so a database leak does not
//! leak usable credentials.

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{AuthError, AuthenticatedUser, OrganizationId};
use crate::ports::SessionValidator;

/// PostgreSQL implementation of SessionValidator.
#[derive(Clone)]
pub struct PostgresSessionValidator {
    pool: PgPool,
}

impl PostgresSessionValidator {
    /// Creates a new PostgresSessionValidator.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl SessionValidator for PostgresSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT organization_id, email, name, expires_at
            FROM sessions
            WHERE token_hash = $1
            "#,
        )
        .bind(hash_token(token))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::ServiceUnavailable(e.to_string()))?;

        let row = row.ok_or(AuthError::InvalidToken)?;

        let expires_at: chrono::DateTime<Utc> = row.get("expires_at");
        if expires_at < Utc::now() {
            return Err(AuthError::TokenExpired);
        }

        Ok(AuthenticatedUser::new(
            OrganizationId::from_uuid(row.get("organization_id")),
            row.get::<String, _>("email"),
            row.get::<Option<String>, _>("name"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hash_is_hex_sha256() {
        let digest = hash_token("session-token");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_tokens_hash_differently() {
        assert_ne!(hash_token("a"), hash_token("b"));
    }
}
