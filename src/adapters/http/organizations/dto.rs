//! HTTP DTOs for organization endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::organization::Organization;

/// Request to create an organization.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
}

/// Organization representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationResponse {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl From<&Organization> for OrganizationResponse {
    fn from(organization: &Organization) -> Self {
        Self {
            id: organization.id().to_string(),
            name: organization.name().to_string(),
            created_at: organization.created_at().as_datetime().to_rfc3339(),
        }
    }
}
