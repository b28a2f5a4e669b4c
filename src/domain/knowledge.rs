//! Knowledge-base entries and ingestion candidates.
//!
//! Entries are deduplicated by `(bot_id, source, content_hash)`; the hash is
//! computed here so every ingestion path agrees on it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::foundation::{BotId, Timestamp};

/// The four source kinds the growth cron ingests from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    ChatbotConversation,
    InterviewTranscript,
    WordpressContent,
    WoocommerceProduct,
}

impl SourceKind {
    /// All source kinds, in ingestion order.
    pub const ALL: [SourceKind; 4] = [
        SourceKind::ChatbotConversation,
        SourceKind::InterviewTranscript,
        SourceKind::WordpressContent,
        SourceKind::WoocommerceProduct,
    ];

    /// Stable name used in storage and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::ChatbotConversation => "chatbot_conversation",
            SourceKind::InterviewTranscript => "interview_transcript",
            SourceKind::WordpressContent => "wordpress_content",
            SourceKind::WoocommerceProduct => "woocommerce_product",
        }
    }
}

/// Raw ingestion candidate produced by a knowledge source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub bot_id: BotId,
    pub source: SourceKind,
    pub title: String,
    pub content: String,
    pub captured_at: Timestamp,
}

/// A deduplicated knowledge-base entry ready for storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KbEntry {
    pub bot_id: BotId,
    pub source: SourceKind,
    pub title: String,
    pub content: String,
    /// SHA-256 of the normalized content, hex-encoded.
    pub content_hash: String,
    pub captured_at: Timestamp,
}

impl KbEntry {
    /// Builds an entry from a candidate, computing the dedup hash.
    pub fn from_candidate(candidate: CandidateEntry) -> Self {
        let content_hash = content_hash(&candidate.content);
        Self {
            bot_id: candidate.bot_id,
            source: candidate.source,
            title: candidate.title,
            content: candidate.content,
            content_hash,
            captured_at: candidate.captured_at,
        }
    }
}

/// SHA-256 hex digest of whitespace-normalized content.
///
/// Whitespace is collapsed first so reformatted copies of the same text
/// dedup to the same entry.
pub fn content_hash(content: &str) -> String {
    let normalized = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let digest = Sha256::digest(normalized.as_bytes());
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_ignores_whitespace_differences() {
        assert_eq!(content_hash("hello  world"), content_hash("hello\nworld"));
    }

    #[test]
    fn hash_differs_for_different_content() {
        assert_ne!(content_hash("hello"), content_hash("world"));
    }

    #[test]
    fn from_candidate_computes_hash() {
        let candidate = CandidateEntry {
            bot_id: BotId::new(),
            source: SourceKind::WordpressContent,
            title: "Pricing page".to_string(),
            content: "Our pricing starts at 29 euro.".to_string(),
            captured_at: Timestamp::now(),
        };
        let entry = KbEntry::from_candidate(candidate.clone());
        assert_eq!(entry.content_hash, content_hash(&candidate.content));
        assert_eq!(entry.source, SourceKind::WordpressContent);
    }

    #[test]
    fn all_sources_have_stable_names() {
        let names: Vec<_> = SourceKind::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"woocommerce_product"));
    }
}
