//! HTTP handlers for interview endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::interview::{
    GetInterviewError, GetInterviewHandler, GetInterviewQuery, SendMessageCommand,
    SendMessageError, SendMessageHandler, StartInterviewCommand, StartInterviewError,
    StartInterviewHandler,
};
use crate::domain::foundation::{BotId, InterviewId};

use super::dto::{
    InterviewResponse, SendMessageRequest, SendMessageResponse, StartInterviewRequest,
    StartInterviewResponse,
};

/// Shared state for the interview router.
#[derive(Clone)]
pub struct InterviewHandlers {
    start: Arc<StartInterviewHandler>,
    send: Arc<SendMessageHandler>,
    get: Arc<GetInterviewHandler>,
}

impl InterviewHandlers {
    pub fn new(
        start: Arc<StartInterviewHandler>,
        send: Arc<SendMessageHandler>,
        get: Arc<GetInterviewHandler>,
    ) -> Self {
        Self { start, send, get }
    }
}

/// POST /api/interviews - Start an interview for a bot
pub async fn start_interview(
    State(handlers): State<InterviewHandlers>,
    RequireAuth(_user): RequireAuth,
    Json(req): Json<StartInterviewRequest>,
) -> Response {
    let cmd = StartInterviewCommand {
        bot_id: BotId::from_uuid(req.bot_id),
    };

    match handlers.start.handle(cmd).await {
        Ok(result) => {
            let body = StartInterviewResponse {
                interview: InterviewResponse::from(&result.session),
                greeting: result.greeting,
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(StartInterviewError::BotNotFound(id)) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found("Bot", id))).into_response()
        }
        Err(StartInterviewError::PlanNotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "NOT_FOUND",
                format!("No plan generated for bot: {}", id),
            )),
        )
            .into_response(),
        Err(StartInterviewError::Domain(e)) => domain_error_response(&e),
    }
}

/// POST /api/interviews/{id}/messages - Process one user turn
pub async fn send_message(
    State(handlers): State<InterviewHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    let cmd = SendMessageCommand {
        interview_id: InterviewId::from_uuid(id),
        text: req.message,
    };

    match handlers.send.handle(cmd).await {
        Ok(result) => {
            let body = SendMessageResponse {
                reply: result.reply,
                interview: InterviewResponse::from(&result.session),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(SendMessageError::InterviewNotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Interview", id)),
        )
            .into_response(),
        Err(SendMessageError::InterviewCompleted(id)) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(format!(
                "Interview already completed: {}",
                id
            ))),
        )
            .into_response(),
        Err(SendMessageError::Generation(e)) => {
            tracing::error!(error = %e, "reply generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Reply generation failed")),
            )
                .into_response()
        }
        Err(SendMessageError::Domain(e)) => domain_error_response(&e),
    }
}

/// GET /api/interviews/{id} - Fetch an interview
pub async fn get_interview(
    State(handlers): State<InterviewHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<uuid::Uuid>,
) -> Response {
    let query = GetInterviewQuery {
        interview_id: InterviewId::from_uuid(id),
    };

    match handlers.get.handle(query).await {
        Ok(session) => {
            (StatusCode::OK, Json(InterviewResponse::from(&session))).into_response()
        }
        Err(GetInterviewError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Interview", id)),
        )
            .into_response(),
        Err(GetInterviewError::Domain(e)) => domain_error_response(&e),
    }
}
