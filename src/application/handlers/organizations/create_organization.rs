//! CreateOrganizationHandler - Create a tenant organization.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, OrganizationId, ValidationError};
use crate::domain::organization::Organization;
use crate::ports::OrganizationRepository;

/// Command to create an organization.
#[derive(Debug, Clone)]
pub struct CreateOrganizationCommand {
    pub name: String,
}

/// Error type for organization creation.
#[derive(Debug, Clone)]
pub enum CreateOrganizationError {
    /// Invalid attributes.
    Validation(ValidationError),
    /// Domain error from a port.
    Domain(DomainError),
}

impl std::fmt::Display for CreateOrganizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateOrganizationError::Validation(err) => write!(f, "{}", err),
            CreateOrganizationError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CreateOrganizationError {}

impl From<DomainError> for CreateOrganizationError {
    fn from(err: DomainError) -> Self {
        CreateOrganizationError::Domain(err)
    }
}

impl From<ValidationError> for CreateOrganizationError {
    fn from(err: ValidationError) -> Self {
        CreateOrganizationError::Validation(err)
    }
}

/// Handler for organization creation.
pub struct CreateOrganizationHandler {
    organizations: Arc<dyn OrganizationRepository>,
}

impl CreateOrganizationHandler {
    pub fn new(organizations: Arc<dyn OrganizationRepository>) -> Self {
        Self { organizations }
    }

    pub async fn handle(
        &self,
        cmd: CreateOrganizationCommand,
    ) -> Result<Organization, CreateOrganizationError> {
        let organization = Organization::new(OrganizationId::new(), cmd.name)?;
        self.organizations.save(&organization).await?;
        tracing::info!(organization_id = %organization.id(), "created organization");
        Ok(organization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryOrganizationRepository;

    #[tokio::test]
    async fn creates_and_persists_organization() {
        let repo = Arc::new(InMemoryOrganizationRepository::new());
        let org = CreateOrganizationHandler::new(repo.clone())
            .handle(CreateOrganizationCommand {
                name: "Acme".to_string(),
            })
            .await
            .unwrap();
        assert!(repo.find_by_id(&org.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let result = CreateOrganizationHandler::new(Arc::new(InMemoryOrganizationRepository::new()))
            .handle(CreateOrganizationCommand {
                name: " ".to_string(),
            })
            .await;
        assert!(matches!(
            result,
            Err(CreateOrganizationError::Validation(_))
        ));
    }
}
