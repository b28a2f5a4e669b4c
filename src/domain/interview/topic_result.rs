//! Per-topic evaluation results.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Outcome of evaluating one interview topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicStatus {
    /// The user covered the topic adequately.
    Passed,
    /// The user could not cover the topic.
    Failed,
    /// The answers revealed a gap worth following up on.
    GapDetected,
}

/// Recorded evaluation of a single topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicResult {
    /// Topic the result belongs to.
    pub topic_id: String,
    /// Evaluation outcome.
    pub status: TopicStatus,
    /// Normalized score in `[0.0, 1.0]`.
    pub score: f32,
}

impl TopicResult {
    /// Creates a new topic result.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the topic id is empty or the score is
    /// outside `[0.0, 1.0]`.
    pub fn new(
        topic_id: impl Into<String>,
        status: TopicStatus,
        score: f32,
    ) -> Result<Self, ValidationError> {
        let topic_id = topic_id.into();
        if topic_id.trim().is_empty() {
            return Err(ValidationError::empty_field("topic_id"));
        }
        if !(0.0..=1.0).contains(&score) || score.is_nan() {
            return Err(ValidationError::invalid_format(
                "score",
                format!("score must be within [0.0, 1.0], got {}", score),
            ));
        }
        Ok(Self {
            topic_id,
            status,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_valid_result() {
        let result = TopicResult::new("pricing", TopicStatus::Passed, 0.85).unwrap();
        assert_eq!(result.topic_id, "pricing");
        assert_eq!(result.status, TopicStatus::Passed);
    }

    #[test]
    fn rejects_empty_topic_id() {
        assert!(TopicResult::new("  ", TopicStatus::Failed, 0.1).is_err());
    }

    #[test]
    fn rejects_out_of_range_score() {
        assert!(TopicResult::new("pricing", TopicStatus::Passed, 1.2).is_err());
        assert!(TopicResult::new("pricing", TopicStatus::Passed, -0.1).is_err());
        assert!(TopicResult::new("pricing", TopicStatus::Passed, f32::NAN).is_err());
    }

    #[test]
    fn status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&TopicStatus::GapDetected).unwrap();
        assert_eq!(json, "\"GAP_DETECTED\"");
    }
}
