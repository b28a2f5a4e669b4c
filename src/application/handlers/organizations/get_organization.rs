//! GetOrganizationHandler - Fetch one organization by id.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, OrganizationId};
use crate::domain::organization::Organization;
use crate::ports::OrganizationRepository;

/// Query for one organization.
#[derive(Debug, Clone)]
pub struct GetOrganizationQuery {
    pub organization_id: OrganizationId,
}

/// Error type for organization reads.
#[derive(Debug, Clone)]
pub enum GetOrganizationError {
    /// Organization not found.
    NotFound(OrganizationId),
    /// Domain error from a port.
    Domain(DomainError),
}

impl std::fmt::Display for GetOrganizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetOrganizationError::NotFound(id) => write!(f, "Organization not found: {}", id),
            GetOrganizationError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetOrganizationError {}

impl From<DomainError> for GetOrganizationError {
    fn from(err: DomainError) -> Self {
        GetOrganizationError::Domain(err)
    }
}

/// Handler for organization reads.
pub struct GetOrganizationHandler {
    organizations: Arc<dyn OrganizationRepository>,
}

impl GetOrganizationHandler {
    pub fn new(organizations: Arc<dyn OrganizationRepository>) -> Self {
        Self { organizations }
    }

    pub async fn handle(
        &self,
        query: GetOrganizationQuery,
    ) -> Result<Organization, GetOrganizationError> {
        self.organizations
            .find_by_id(&query.organization_id)
            .await?
            .ok_or(GetOrganizationError::NotFound(query.organization_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryOrganizationRepository;

    #[tokio::test]
    async fn missing_organization_is_not_found() {
        let result = GetOrganizationHandler::new(Arc::new(InMemoryOrganizationRepository::new()))
            .handle(GetOrganizationQuery {
                organization_id: OrganizationId::new(),
            })
            .await;
        assert!(matches!(result, Err(GetOrganizationError::NotFound(_))));
    }
}
