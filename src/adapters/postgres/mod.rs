//! PostgreSQL adapters - persistence implementations of the ports.

mod bot_repository;
mod conversation_reader;
mod interview_repository;
mod knowledge_base;
mod organization_repository;
mod plan_repository;
mod session_validator;
mod transcript_source;

pub use bot_repository::PostgresBotRepository;
pub use conversation_reader::PostgresConversationReader;
pub use interview_repository::PostgresInterviewRepository;
pub use knowledge_base::PostgresKnowledgeBase;
pub use organization_repository::PostgresOrganizationRepository;
pub use plan_repository::PostgresPlanRepository;
pub use session_validator::PostgresSessionValidator;
pub use transcript_source::PostgresTranscriptSource;
