//! In-memory organization repository for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, OrganizationId};
use crate::domain::organization::Organization;
use crate::ports::OrganizationRepository;

/// HashMap-backed implementation of `OrganizationRepository`.
#[derive(Default)]
pub struct InMemoryOrganizationRepository {
    organizations: RwLock<HashMap<OrganizationId, Organization>>,
}

impl InMemoryOrganizationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn save(&self, organization: &Organization) -> Result<(), DomainError> {
        self.organizations
            .write()
            .unwrap()
            .insert(organization.id(), organization.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, DomainError> {
        Ok(self.organizations.read().unwrap().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Organization>, DomainError> {
        let mut orgs: Vec<Organization> =
            self.organizations.read().unwrap().values().cloned().collect();
        orgs.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(orgs)
    }
}
