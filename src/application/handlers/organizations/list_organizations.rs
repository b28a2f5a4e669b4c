//! ListOrganizationsHandler - List all organizations.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::organization::Organization;
use crate::ports::OrganizationRepository;

/// Handler for organization listing.
pub struct ListOrganizationsHandler {
    organizations: Arc<dyn OrganizationRepository>,
}

impl ListOrganizationsHandler {
    pub fn new(organizations: Arc<dyn OrganizationRepository>) -> Self {
        Self { organizations }
    }

    pub async fn handle(&self) -> Result<Vec<Organization>, DomainError> {
        self.organizations.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryOrganizationRepository;
    use crate::domain::foundation::OrganizationId;

    #[tokio::test]
    async fn lists_all_organizations() {
        let repo = Arc::new(InMemoryOrganizationRepository::new());
        for name in ["A", "B"] {
            repo.save(&Organization::new(OrganizationId::new(), name).unwrap())
                .await
                .unwrap();
        }
        let listed = ListOrganizationsHandler::new(repo).handle().await.unwrap();
        assert_eq!(listed.len(), 2);
    }
}
