//! Interview plan value objects.

use serde::{Deserialize, Serialize};

/// Turn budget for a single interview topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicBudget {
    /// Stable topic identifier (slug).
    pub id: String,
    /// Human-readable topic label.
    pub label: String,
    /// Maximum conversation turns to spend on this topic.
    pub max_turns: u32,
}

impl TopicBudget {
    /// Creates a new topic budget.
    pub fn new(id: impl Into<String>, label: impl Into<String>, max_turns: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            max_turns,
        }
    }
}

/// The scan phase: a quick pass over every topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScanPhase {
    /// Ordered topics for the scan pass.
    pub topics: Vec<TopicBudget>,
}

/// The deep phase: extended exploration of selected topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepPhase {
    /// Ordered topics for the deep pass.
    pub topics: Vec<TopicBudget>,
    /// Global cap on turns any deep topic may receive.
    pub max_turns_per_topic: u32,
    /// Turns granted to a deep topic when the budget runs out.
    pub fallback_turns: u32,
}

/// Plan-level timing metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanMeta {
    /// Target interview duration in minutes.
    pub duration_minutes: u32,
    /// Expected seconds per conversation turn.
    pub seconds_per_turn: u32,
    /// Soft per-topic time budget in seconds.
    pub topic_time_budget_secs: u32,
}

/// A generated turn-budget schedule for an interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewPlan {
    pub meta: PlanMeta,
    pub scan: ScanPhase,
    pub deep: DeepPhase,
}

impl InterviewPlan {
    /// Looks up a topic budget by id across both phases (scan first).
    pub fn topic(&self, id: &str) -> Option<&TopicBudget> {
        self.scan
            .topics
            .iter()
            .chain(self.deep.topics.iter())
            .find(|t| t.id == id)
    }

    /// All topics in interview order: scan pass, then deep pass.
    pub fn ordered_topics(&self) -> impl Iterator<Item = &TopicBudget> {
        self.scan.topics.iter().chain(self.deep.topics.iter())
    }

    /// Number of topic slots across both phases.
    pub fn topic_count(&self) -> usize {
        self.scan.topics.len() + self.deep.topics.len()
    }

    /// Sum of all per-topic turn budgets.
    pub fn total_turn_budget(&self) -> u32 {
        self.ordered_topics().map(|t| t.max_turns).sum()
    }
}
