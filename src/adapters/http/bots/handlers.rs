//! HTTP handlers for bot and plan endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{
    domain_error_response, validation_error_response, ErrorResponse,
};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::bots::{
    CreateBotCommand, CreateBotError, CreateBotHandler, DeleteBotCommand, DeleteBotError,
    DeleteBotHandler, GetBotError, GetBotHandler, GetBotQuery, ListBotsHandler, ListBotsQuery,
    UpdateBotCommand, UpdateBotError, UpdateBotHandler,
};
use crate::application::handlers::plans::{
    GeneratePlanCommand, GeneratePlanError, GeneratePlanHandler, GetEffectivePlanError,
    GetEffectivePlanHandler, GetEffectivePlanQuery, TopicSpec, UpdatePlanOverridesCommand,
    UpdatePlanOverridesError, UpdatePlanOverridesHandler,
};
use crate::domain::foundation::{BotId, ProjectId};

use super::dto::{
    BotResponse, CreateBotRequest, EffectivePlanResponse, GeneratePlanRequest, ListBotsParams,
    OverridesUpdateResponse, PlanResponse, UpdateBotRequest, UpdateOverridesRequest,
};

/// Shared state for the bot router.
#[derive(Clone)]
pub struct BotHandlers {
    create: Arc<CreateBotHandler>,
    get: Arc<GetBotHandler>,
    list: Arc<ListBotsHandler>,
    update: Arc<UpdateBotHandler>,
    delete: Arc<DeleteBotHandler>,
    generate_plan: Arc<GeneratePlanHandler>,
    get_plan: Arc<GetEffectivePlanHandler>,
    update_overrides: Arc<UpdatePlanOverridesHandler>,
}

impl BotHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create: Arc<CreateBotHandler>,
        get: Arc<GetBotHandler>,
        list: Arc<ListBotsHandler>,
        update: Arc<UpdateBotHandler>,
        delete: Arc<DeleteBotHandler>,
        generate_plan: Arc<GeneratePlanHandler>,
        get_plan: Arc<GetEffectivePlanHandler>,
        update_overrides: Arc<UpdatePlanOverridesHandler>,
    ) -> Self {
        Self {
            create,
            get,
            list,
            update,
            delete,
            generate_plan,
            get_plan,
            update_overrides,
        }
    }
}

/// POST /api/bots - Create a bot
pub async fn create_bot(
    State(handlers): State<BotHandlers>,
    RequireAuth(_user): RequireAuth,
    Json(req): Json<CreateBotRequest>,
) -> Response {
    let cmd = CreateBotCommand {
        project_id: ProjectId::from_uuid(req.project_id),
        name: req.name,
        kind: req.kind,
    };

    match handlers.create.handle(cmd).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(BotResponse::from(&result.bot))).into_response()
        }
        Err(CreateBotError::Validation(e)) => validation_error_response(&e),
        Err(CreateBotError::Domain(e)) => domain_error_response(&e),
    }
}

/// GET /api/bots?project_id= - List a project's bots
pub async fn list_bots(
    State(handlers): State<BotHandlers>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ListBotsParams>,
) -> Response {
    let query = ListBotsQuery {
        project_id: ProjectId::from_uuid(params.project_id),
    };

    match handlers.list.handle(query).await {
        Ok(bots) => {
            let body: Vec<BotResponse> = bots.iter().map(BotResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/bots/{id} - Fetch a bot
pub async fn get_bot(
    State(handlers): State<BotHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<uuid::Uuid>,
) -> Response {
    let query = GetBotQuery {
        bot_id: BotId::from_uuid(id),
    };

    match handlers.get.handle(query).await {
        Ok(bot) => (StatusCode::OK, Json(BotResponse::from(&bot))).into_response(),
        Err(GetBotError::NotFound(id)) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found("Bot", id))).into_response()
        }
        Err(GetBotError::Domain(e)) => domain_error_response(&e),
    }
}

/// PUT /api/bots/{id} - Update a bot
pub async fn update_bot(
    State(handlers): State<BotHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateBotRequest>,
) -> Response {
    let cmd = UpdateBotCommand {
        bot_id: BotId::from_uuid(id),
        name: req.name,
        kb_enabled: req.kb_enabled,
    };

    match handlers.update.handle(cmd).await {
        Ok(bot) => (StatusCode::OK, Json(BotResponse::from(&bot))).into_response(),
        Err(UpdateBotError::NotFound(id)) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found("Bot", id))).into_response()
        }
        Err(UpdateBotError::Validation(e)) => validation_error_response(&e),
        Err(UpdateBotError::Domain(e)) => domain_error_response(&e),
    }
}

/// DELETE /api/bots/{id} - Delete a bot
pub async fn delete_bot(
    State(handlers): State<BotHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<uuid::Uuid>,
) -> Response {
    let cmd = DeleteBotCommand {
        bot_id: BotId::from_uuid(id),
    };

    match handlers.delete.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(DeleteBotError::NotFound(id)) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found("Bot", id))).into_response()
        }
        Err(DeleteBotError::Domain(e)) => domain_error_response(&e),
    }
}

/// POST /api/bots/{id}/plan/generate - Generate the base plan
pub async fn generate_plan(
    State(handlers): State<BotHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<GeneratePlanRequest>,
) -> Response {
    let cmd = GeneratePlanCommand {
        bot_id: BotId::from_uuid(id),
        duration_minutes: req.duration_minutes,
        seconds_per_turn: req.seconds_per_turn,
        scan_topics: req
            .scan_topics
            .into_iter()
            .map(|t| TopicSpec { id: t.id, label: t.label })
            .collect(),
        deep_topics: req
            .deep_topics
            .into_iter()
            .map(|t| TopicSpec { id: t.id, label: t.label })
            .collect(),
        max_turns_per_topic: req.max_turns_per_topic,
        fallback_turns: req.fallback_turns,
    };

    match handlers.generate_plan.handle(cmd).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(PlanResponse::from(&result.plan))).into_response()
        }
        Err(GeneratePlanError::BotNotFound(id)) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found("Bot", id))).into_response()
        }
        Err(GeneratePlanError::Validation(e)) => validation_error_response(&e),
        Err(GeneratePlanError::Domain(e)) => domain_error_response(&e),
    }
}

/// GET /api/bots/{id}/plan - Base plan, overrides, and the effective merge
pub async fn get_plan(
    State(handlers): State<BotHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<uuid::Uuid>,
) -> Response {
    let query = GetEffectivePlanQuery {
        bot_id: BotId::from_uuid(id),
    };

    match handlers.get_plan.handle(query).await {
        Ok(result) => {
            let body = EffectivePlanResponse {
                base: PlanResponse::from(&result.base),
                overrides: result.overrides,
                effective: PlanResponse::from(&result.effective),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(GetEffectivePlanError::PlanNotFound(id)) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found("Plan", id))).into_response()
        }
        Err(GetEffectivePlanError::Domain(e)) => domain_error_response(&e),
    }
}

/// PUT /api/bots/{id}/plan/overrides - Update plan overrides
pub async fn update_overrides(
    State(handlers): State<BotHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateOverridesRequest>,
) -> Response {
    let cmd = UpdatePlanOverridesCommand {
        bot_id: BotId::from_uuid(id),
        topic_turns: req.topic_turns,
        max_turns_per_topic: req.max_turns_per_topic,
        fallback_turns: req.fallback_turns,
    };

    match handlers.update_overrides.handle(cmd).await {
        Ok(result) => {
            let body = OverridesUpdateResponse {
                effective: PlanResponse::from(&result.effective),
                overrides: result.overrides,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(UpdatePlanOverridesError::PlanNotFound(id)) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found("Plan", id))).into_response()
        }
        Err(UpdatePlanOverridesError::Validation(e)) => validation_error_response(&e),
        Err(UpdatePlanOverridesError::Domain(e)) => domain_error_response(&e),
    }
}
