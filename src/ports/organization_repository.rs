//! Organization repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrganizationId};
use crate::domain::organization::Organization;

/// Repository port for Organization aggregate persistence.
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Save a new organization.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, organization: &Organization) -> Result<(), DomainError>;

    /// Find an organization by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, DomainError>;

    /// List all organizations, newest first.
    async fn list(&self) -> Result<Vec<Organization>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn OrganizationRepository) {}
    }
}
