//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.

mod bot_repository;
mod conversation_reader;
mod interview_repository;
mod knowledge_base;
mod knowledge_source;
mod llm_gateway;
mod organization_repository;
mod plan_repository;
mod session_validator;

pub use bot_repository::BotRepository;
pub use conversation_reader::ConversationReader;
pub use interview_repository::InterviewRepository;
pub use knowledge_base::{InsertOutcome, KnowledgeBaseStore};
pub use knowledge_source::{KnowledgeSource, SourceError};
pub use llm_gateway::{
    ChatMessage, ChatRole, CompletionRequest, CompletionResponse, LlmError, LlmGateway,
};
pub use organization_repository::OrganizationRepository;
pub use plan_repository::PlanRepository;
pub use session_validator::SessionValidator;
