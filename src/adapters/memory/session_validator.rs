//! In-memory session validator for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Token-table implementation of `SessionValidator`.
#[derive(Default)]
pub struct InMemorySessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
}

impl InMemorySessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a valid token.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens.write().unwrap().insert(token.into(), user);
    }
}

#[async_trait]
impl SessionValidator for InMemorySessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::OrganizationId;

    #[tokio::test]
    async fn known_token_validates() {
        let validator = InMemorySessionValidator::new();
        let org = OrganizationId::new();
        validator.add_token("tok", AuthenticatedUser::new(org, "a@b.c", None));
        assert_eq!(
            validator.validate("tok").await.unwrap().organization_id,
            org
        );
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = InMemorySessionValidator::new();
        assert!(matches!(
            validator.validate("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
