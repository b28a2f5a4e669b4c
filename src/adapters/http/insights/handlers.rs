//! HTTP handlers for insight endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::domain_error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::insights::{GetProjectInsightsHandler, GetProjectInsightsQuery};
use crate::domain::foundation::ProjectId;

use super::dto::ProjectInsightsResponse;

/// Shared state for the insights router.
#[derive(Clone)]
pub struct InsightHandlers {
    get: Arc<GetProjectInsightsHandler>,
}

impl InsightHandlers {
    pub fn new(get: Arc<GetProjectInsightsHandler>) -> Self {
        Self { get }
    }
}

/// GET /api/projects/{id}/insights - Project analytics report
pub async fn get_project_insights(
    State(handlers): State<InsightHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<uuid::Uuid>,
) -> Response {
    let query = GetProjectInsightsQuery {
        project_id: ProjectId::from_uuid(id),
    };

    match handlers.get.handle(query).await {
        Ok(result) => {
            let body = ProjectInsightsResponse {
                overview: result.overview,
                insights: result.insights,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => domain_error_response(&e),
    }
}
