//! LLM gateway port for model completions.
//!
//! Abstracts the chat-completion provider behind a single trait so the
//! interview engine, classifiers, and plan generator never couple to a
//! specific vendor API.
//!
//! # Design
//!
//! - Provider-agnostic message format
//! - Optional JSON response mode for structured extraction calls
//! - Error variants for the failure modes callers branch on; classification
//!   callers treat every variant as "no signal" and fall back to defaults

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for chat-completion calls against an LLM provider.
///
/// Implementations connect to an OpenAI-compatible API and translate between
/// the wire format and these types.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

/// Request for an LLM completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier (e.g. "gpt-4o-mini").
    pub model: String,
    /// Conversation messages, system prompt first.
    pub messages: Vec<ChatMessage>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Ask the provider for a JSON object response.
    pub json_mode: bool,
}

impl CompletionRequest {
    /// Creates a request for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
            json_mode: false,
        }
    }

    /// Adds a message to the conversation.
    pub fn with_message(mut self, role: ChatRole, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::new(role, content));
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Requests a JSON object response.
    pub fn with_json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// A message in the completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Creates a new message.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Response from an LLM completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
}

/// LLM gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No API key configured for the gateway.
    #[error("gateway not configured: missing API key")]
    NotConfigured,

    /// API key rejected by the provider.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by the provider.
    #[error("rate limited")]
    RateLimited,

    /// Provider returned a 5xx or is unreachable.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl LlmError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_works() {
        let request = CompletionRequest::new("gpt-4o-mini")
            .with_message(ChatRole::System, "Classify the reply.")
            .with_message(ChatRole::User, "va bene")
            .with_temperature(0.0)
            .with_max_tokens(16)
            .with_json_mode();

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[1].content, "va bene");
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(request.max_tokens, Some(16));
        assert!(request.json_mode);
    }

    #[test]
    fn message_constructors_set_roles() {
        assert_eq!(ChatMessage::system("a").role, ChatRole::System);
        assert_eq!(ChatMessage::user("b").role, ChatRole::User);
        assert_eq!(ChatMessage::assistant("c").role, ChatRole::Assistant);
    }

    #[test]
    fn chat_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
