//! Interview message history entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Role of a message sender in an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions.
    System,
    /// Interviewee input.
    User,
    /// Interviewer (model) response.
    Assistant,
}

/// A single message in the interview transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewMessage {
    pub role: MessageRole,
    pub content: String,
    pub sent_at: Timestamp,
}

impl InterviewMessage {
    /// Creates a new message stamped with the current time.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            sent_at: Timestamp::now(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}
