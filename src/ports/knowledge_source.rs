//! Knowledge source port for the growth cron.
//!
//! One implementation per source kind (chatbot transcripts, interview
//! transcripts, WordPress content, WooCommerce products). The cron fans out
//! over all registered sources; a failing source is logged and skipped so the
//! others still run.

use async_trait::async_trait;

use crate::domain::foundation::{BotId, Timestamp};
use crate::domain::knowledge::{CandidateEntry, SourceKind};

/// Port for fetching ingestion candidates from one content source.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Which source kind this implementation covers.
    fn kind(&self) -> SourceKind;

    /// Fetch candidates for a bot captured at or after `since`.
    ///
    /// # Errors
    ///
    /// - `SourceError::Unavailable` if the upstream cannot be reached
    /// - `SourceError::Malformed` if the upstream payload cannot be parsed
    async fn fetch_since(
        &self,
        bot_id: &BotId,
        since: Timestamp,
    ) -> Result<Vec<CandidateEntry>, SourceError>;
}

/// Knowledge source errors.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The upstream system is unreachable or returned a server error.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The upstream payload could not be parsed.
    #[error("malformed source payload: {0}")]
    Malformed(String),

    /// The source is not configured for this bot.
    #[error("source not configured")]
    NotConfigured,
}

impl SourceError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a malformed payload error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knowledge_source_is_object_safe() {
        fn _accepts_dyn(_source: &dyn KnowledgeSource) {}
    }

    #[test]
    fn source_error_displays() {
        assert_eq!(
            SourceError::unavailable("timeout").to_string(),
            "source unavailable: timeout"
        );
        assert_eq!(
            SourceError::malformed("missing field").to_string(),
            "malformed source payload: missing field"
        );
    }
}
