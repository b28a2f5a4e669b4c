//! Shared HTTP error payload and domain error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Standard error body for every non-2xx response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource, id))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

/// Maps a domain error to the HTTP response the API contract promises.
pub fn domain_error_response(error: &DomainError) -> Response {
    let (status, code) = match error.code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),

        ErrorCode::OrganizationNotFound
        | ErrorCode::ProjectNotFound
        | ErrorCode::BotNotFound
        | ErrorCode::InterviewNotFound
        | ErrorCode::PlanNotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),

        ErrorCode::InvalidStateTransition
        | ErrorCode::InterviewCompleted
        | ErrorCode::TopicOutOfRange
        | ErrorCode::TurnBudgetExhausted => (StatusCode::CONFLICT, "CONFLICT"),

        ErrorCode::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
        ErrorCode::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),

        ErrorCode::LlmGatewayError
        | ErrorCode::SourceUnavailable
        | ErrorCode::DatabaseError
        | ErrorCode::InternalError => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(code = ?error.code, message = %error.message, "request failed");
        // Infrastructure detail stays in the logs.
        return (
            status,
            Json(ErrorResponse::internal("An unexpected error occurred")),
        )
            .into_response();
    }

    (status, Json(ErrorResponse::new(code, &error.message))).into_response()
}

/// Maps a validation error to a 400 response.
pub fn validation_error_response(error: &ValidationError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(error.to_string())),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_codes_map_to_404() {
        let error = DomainError::new(ErrorCode::BotNotFound, "Bot not found");
        assert_eq!(domain_error_response(&error).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn state_errors_map_to_409() {
        let error = DomainError::new(ErrorCode::InterviewCompleted, "immutable");
        assert_eq!(domain_error_response(&error).status(), StatusCode::CONFLICT);
    }

    #[test]
    fn infrastructure_errors_map_to_500_without_detail() {
        let error = DomainError::new(ErrorCode::DatabaseError, "connection refused to 10.0.0.3");
        assert_eq!(
            domain_error_response(&error).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_serializes_contract_shape() {
        let body = serde_json::to_value(ErrorResponse::bad_request("bad input")).unwrap();
        assert_eq!(body["error"], "BAD_REQUEST");
        assert_eq!(body["message"], "bad input");
    }
}
