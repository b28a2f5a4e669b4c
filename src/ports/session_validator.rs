//! Session validation port.
//!
//! Validates opaque session tokens minted by the auth frontend and maps them
//! to an organization-scoped identity. HTTP middleware uses this to guard
//! every tenant route.
//!
//! # Contract
//!
//! Implementations must:
//! - Return `AuthError::InvalidToken` for unknown or malformed tokens
//! - Return `AuthError::TokenExpired` for known but expired tokens
//! - Return `AuthError::ServiceUnavailable` for transient backend errors

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates session tokens and extracts the caller's identity.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a session token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::OrganizationId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    impl TestSessionValidator {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
            }
        }

        fn add_valid_token(&self, token: &str, user: AuthenticatedUser) {
            self.tokens.write().unwrap().insert(token.to_string(), user);
        }
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn returns_user_for_valid_token() {
        let validator = TestSessionValidator::new();
        let org = OrganizationId::new();
        validator.add_valid_token(
            "valid-token-123",
            AuthenticatedUser::new(org, "owner@example.com", None),
        );

        let user = validator.validate("valid-token-123").await.unwrap();
        assert_eq!(user.organization_id, org);
    }

    #[tokio::test]
    async fn returns_error_for_unknown_token() {
        let validator = TestSessionValidator::new();
        let result = validator.validate("nope").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
