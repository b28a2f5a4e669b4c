//! Organization handlers.

mod create_organization;
mod get_organization;
mod list_organizations;

pub use create_organization::{
    CreateOrganizationCommand, CreateOrganizationError, CreateOrganizationHandler,
};
pub use get_organization::{GetOrganizationError, GetOrganizationHandler, GetOrganizationQuery};
pub use list_organizations::ListOrganizationsHandler;
