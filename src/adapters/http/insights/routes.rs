//! HTTP routes for insight endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_project_insights, InsightHandlers};

/// Creates the insights router, mounted under `/api/projects`.
pub fn insight_routes(handlers: InsightHandlers) -> Router {
    Router::new()
        .route("/:id/insights", get(get_project_insights))
        .with_state(handlers)
}
