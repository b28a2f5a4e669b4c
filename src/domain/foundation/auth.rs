//! Authenticated caller identity and authentication errors.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::OrganizationId;

/// Identity extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Organization the session belongs to.
    pub organization_id: OrganizationId,
    /// Email of the signed-in member.
    pub email: String,
    /// Display name, if the provider supplies one.
    pub name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates an authenticated user.
    pub fn new(
        organization_id: OrganizationId,
        email: impl Into<String>,
        name: Option<String>,
    ) -> Self {
        Self {
            organization_id,
            email: email.into(),
            name,
        }
    }
}

/// Authentication errors surfaced by token validation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Token is malformed or its signature is invalid.
    #[error("invalid token")]
    InvalidToken,

    /// Token was valid but has expired.
    #[error("token expired")]
    TokenExpired,

    /// No token was provided on a protected route.
    #[error("missing token")]
    MissingToken,

    /// The auth backend is unreachable.
    #[error("auth service unavailable: {0}")]
    ServiceUnavailable(String),
}
