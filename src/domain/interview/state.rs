//! Interview phase state machine.
//!
//! Defines the lifecycle of an AI-led interview and valid transitions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle phase of an interview session.
///
/// Interviews move through these phases from creation to completion:
/// - `Pending`: created, awaiting the opening turn
/// - `Started`: greeting and consent exchange done
/// - topic loop: `Explaining` -> `Quiz` -> `Evaluated`, advancing the
///   topic index on each entry into `Explaining`
/// - `Completed`: terminal; the session becomes immutable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    /// Session created, no turns exchanged yet.
    #[default]
    Pending,

    /// Interview opened, consent gathered, ready for the first topic.
    Started,

    /// The agent is walking the user through the current topic.
    Explaining,

    /// The agent is probing the user's answers on the current topic.
    Quiz,

    /// The current topic has been scored.
    Evaluated,

    /// Interview finished; read-only from here on.
    Completed,
}

impl InterviewPhase {
    /// Returns true if user messages are accepted in this phase.
    pub fn accepts_user_input(&self) -> bool {
        matches!(self, Self::Started | Self::Explaining | Self::Quiz)
    }

    /// Returns true if the session is inside the per-topic loop.
    pub fn in_topic_loop(&self) -> bool {
        matches!(self, Self::Explaining | Self::Quiz | Self::Evaluated)
    }

    /// Returns true if the session is still modifiable.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Completed)
    }
}

impl StateMachine for InterviewPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use InterviewPhase::*;
        matches!(
            (self, target),
            // Opening flow
            (Pending, Started) |
            // First topic begins
            (Started, Explaining) |
            // Topic loop
            (Explaining, Quiz) |
            (Quiz, Evaluated) |
            // Next topic: index advances on this transition
            (Evaluated, Explaining) |
            // Normal completion after the last topic
            (Evaluated, Completed) |
            // Explicit closure request mid-topic
            (Explaining, Completed) |
            (Quiz, Completed) |
            // Refused consent: nothing to interview
            (Started, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use InterviewPhase::*;
        match self {
            Pending => vec![Started],
            Started => vec![Explaining, Completed],
            Explaining => vec![Quiz, Completed],
            Quiz => vec![Evaluated, Completed],
            Evaluated => vec![Explaining, Completed],
            Completed => vec![],
        }
    }
}
