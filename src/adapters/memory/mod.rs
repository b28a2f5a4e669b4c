//! In-memory adapters for tests and local development.
//!
//! Each type implements one port with plain locked collections. Behavior
//! mirrors the postgres adapters closely enough that application handlers
//! can be tested without a database.

mod bot_repository;
mod conversation_reader;
mod interview_repository;
mod knowledge_base;
mod knowledge_source;
mod organization_repository;
mod plan_repository;
mod session_validator;

pub use bot_repository::InMemoryBotRepository;
pub use conversation_reader::InMemoryConversationReader;
pub use interview_repository::InMemoryInterviewRepository;
pub use knowledge_base::InMemoryKnowledgeBase;
pub use knowledge_source::FixedKnowledgeSource;
pub use organization_repository::InMemoryOrganizationRepository;
pub use plan_repository::InMemoryPlanRepository;
pub use session_validator::InMemorySessionValidator;
