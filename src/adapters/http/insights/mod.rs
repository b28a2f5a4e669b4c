//! HTTP adapter for insight endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::ProjectInsightsResponse;
pub use handlers::InsightHandlers;
pub use routes::insight_routes;
