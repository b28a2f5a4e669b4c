//! HTTP routes for organization endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_organization, get_organization, list_organizations, OrganizationHandlers,
};

/// Creates the organization router, mounted under `/api/organizations`.
pub fn organization_routes(handlers: OrganizationHandlers) -> Router {
    Router::new()
        .route("/", post(create_organization))
        .route("/", get(list_organizations))
        .route("/:id", get(get_organization))
        .with_state(handlers)
}
