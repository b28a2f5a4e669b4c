//! HTTP middleware for axum.
//!
//! - `auth` - session-token validation and auth extractors

pub mod auth;

pub use auth::{auth_middleware, AuthRejection, AuthState, OptionalAuth, RequireAuth};
