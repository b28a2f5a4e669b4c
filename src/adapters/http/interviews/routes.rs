//! HTTP routes for interview endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_interview, send_message, start_interview, InterviewHandlers};

/// Creates the interview router, mounted under `/api/interviews`.
pub fn interview_routes(handlers: InterviewHandlers) -> Router {
    Router::new()
        .route("/", post(start_interview))
        .route("/:id", get(get_interview))
        .route("/:id/messages", post(send_message))
        .with_state(handlers)
}
