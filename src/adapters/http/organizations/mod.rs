//! HTTP adapter for organization endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateOrganizationRequest, OrganizationResponse};
pub use handlers::OrganizationHandlers;
pub use routes::organization_routes;
