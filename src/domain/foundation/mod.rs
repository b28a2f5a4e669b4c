//! Foundation value objects shared across domain modules.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BotId, ConversationId, InterviewId, OrganizationId, ProjectId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
