//! Organization aggregate: the tenant and billing unit.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrganizationId, Timestamp, ValidationError};

/// A tenant containing projects, members, and a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    id: OrganizationId,
    name: String,
    created_at: Timestamp,
}

impl Organization {
    /// Creates a new organization.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is empty.
    pub fn new(id: OrganizationId, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id,
            name,
            created_at: Timestamp::now(),
        })
    }

    /// Rehydrates an organization from persisted state.
    pub fn restore(id: OrganizationId, name: String, created_at: Timestamp) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }

    pub fn id(&self) -> OrganizationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_organization() {
        let org = Organization::new(OrganizationId::new(), "Acme").unwrap();
        assert_eq!(org.name(), "Acme");
    }

    #[test]
    fn rejects_empty_name() {
        assert!(Organization::new(OrganizationId::new(), "").is_err());
    }
}
