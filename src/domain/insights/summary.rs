//! Pre-computed conversation summaries fed into the analytics engine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProjectId, Timestamp};

/// Which product surface a conversation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationSource {
    Chatbot,
    Interview,
}

/// A theme mentioned in a conversation with its local sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeMention {
    /// Normalized theme name.
    pub name: String,
    /// Sentiment toward the theme in `[-1.0, 1.0]`.
    pub sentiment: f32,
}

impl ThemeMention {
    pub fn new(name: impl Into<String>, sentiment: f32) -> Self {
        Self {
            name: name.into(),
            sentiment,
        }
    }
}

/// Aggregate view of one finished conversation.
///
/// Themes and sentiment are computed upstream when the conversation is
/// summarized; the engine only correlates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub project_id: ProjectId,
    pub source: ConversationSource,
    pub started_at: Timestamp,
    pub duration_secs: u32,
    pub completed: bool,
    /// Overall sentiment in `[-1.0, 1.0]`.
    pub sentiment: f32,
    /// Net promoter score answer, if asked (0..=10).
    pub nps: Option<u8>,
    pub themes: Vec<ThemeMention>,
}
