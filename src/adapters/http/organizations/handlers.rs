//! HTTP handlers for organization endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{
    domain_error_response, validation_error_response, ErrorResponse,
};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::organizations::{
    CreateOrganizationCommand, CreateOrganizationError, CreateOrganizationHandler,
    GetOrganizationError, GetOrganizationHandler, GetOrganizationQuery, ListOrganizationsHandler,
};
use crate::domain::foundation::OrganizationId;

use super::dto::{CreateOrganizationRequest, OrganizationResponse};

/// Shared state for the organization router.
#[derive(Clone)]
pub struct OrganizationHandlers {
    create: Arc<CreateOrganizationHandler>,
    get: Arc<GetOrganizationHandler>,
    list: Arc<ListOrganizationsHandler>,
}

impl OrganizationHandlers {
    pub fn new(
        create: Arc<CreateOrganizationHandler>,
        get: Arc<GetOrganizationHandler>,
        list: Arc<ListOrganizationsHandler>,
    ) -> Self {
        Self { create, get, list }
    }
}

/// POST /api/organizations - Create an organization
pub async fn create_organization(
    State(handlers): State<OrganizationHandlers>,
    RequireAuth(_user): RequireAuth,
    Json(req): Json<CreateOrganizationRequest>,
) -> Response {
    let cmd = CreateOrganizationCommand { name: req.name };

    match handlers.create.handle(cmd).await {
        Ok(organization) => (
            StatusCode::CREATED,
            Json(OrganizationResponse::from(&organization)),
        )
            .into_response(),
        Err(CreateOrganizationError::Validation(e)) => validation_error_response(&e),
        Err(CreateOrganizationError::Domain(e)) => domain_error_response(&e),
    }
}

/// GET /api/organizations - List organizations
pub async fn list_organizations(
    State(handlers): State<OrganizationHandlers>,
    RequireAuth(_user): RequireAuth,
) -> Response {
    match handlers.list.handle().await {
        Ok(organizations) => {
            let body: Vec<OrganizationResponse> =
                organizations.iter().map(OrganizationResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/organizations/{id} - Fetch an organization
pub async fn get_organization(
    State(handlers): State<OrganizationHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<uuid::Uuid>,
) -> Response {
    let query = GetOrganizationQuery {
        organization_id: OrganizationId::from_uuid(id),
    };

    match handlers.get.handle(query).await {
        Ok(organization) => {
            (StatusCode::OK, Json(OrganizationResponse::from(&organization))).into_response()
        }
        Err(GetOrganizationError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Organization", id)),
        )
            .into_response(),
        Err(GetOrganizationError::Domain(e)) => domain_error_response(&e),
    }
}
