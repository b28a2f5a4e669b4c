//! Deterministic turn-budget allocation.
//!
//! Turns the requested interview duration into per-topic turn budgets.
//! The scan phase gets a fixed short allocation per topic; whatever budget
//! remains is split evenly across deep topics, capped per topic and never
//! below the fallback allocation. Leftover turns go to the earliest deep
//! topics, so allocation is fully deterministic.

use super::plan::{DeepPhase, InterviewPlan, PlanMeta, ScanPhase, TopicBudget};
use crate::domain::foundation::ValidationError;

/// Turns each scan topic receives.
const SCAN_TURNS_PER_TOPIC: u32 = 2;

/// Default cap on turns per deep topic.
const DEFAULT_MAX_TURNS_PER_TOPIC: u32 = 8;

/// Default turns granted when the budget is exhausted.
const DEFAULT_FALLBACK_TURNS: u32 = 2;

/// Builder for [`InterviewPlan`] with deterministic turn budgeting.
#[derive(Debug, Clone)]
pub struct PlanBuilder {
    duration_minutes: u32,
    seconds_per_turn: u32,
    max_turns_per_topic: u32,
    fallback_turns: u32,
    scan_topics: Vec<(String, String)>,
    deep_topics: Vec<(String, String)>,
}

impl PlanBuilder {
    /// Creates a builder for an interview of the given duration.
    pub fn new(duration_minutes: u32, seconds_per_turn: u32) -> Self {
        Self {
            duration_minutes,
            seconds_per_turn,
            max_turns_per_topic: DEFAULT_MAX_TURNS_PER_TOPIC,
            fallback_turns: DEFAULT_FALLBACK_TURNS,
            scan_topics: Vec::new(),
            deep_topics: Vec::new(),
        }
    }

    /// Adds a topic to the scan phase.
    pub fn with_scan_topic(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.scan_topics.push((id.into(), label.into()));
        self
    }

    /// Adds a topic to the deep phase.
    pub fn with_deep_topic(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.deep_topics.push((id.into(), label.into()));
        self
    }

    /// Overrides the per-topic cap for the deep phase.
    pub fn with_max_turns_per_topic(mut self, cap: u32) -> Self {
        self.max_turns_per_topic = cap;
        self
    }

    /// Overrides the fallback allocation for the deep phase.
    pub fn with_fallback_turns(mut self, turns: u32) -> Self {
        self.fallback_turns = turns;
        self
    }

    /// Builds the plan, allocating the turn budget across topics.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the duration or cadence is out of range,
    /// no topics were added, or topic ids are duplicated.
    pub fn build(self) -> Result<InterviewPlan, ValidationError> {
        if !(5..=120).contains(&self.duration_minutes) {
            return Err(ValidationError::out_of_range(
                "duration_minutes",
                5,
                120,
                self.duration_minutes as i64,
            ));
        }
        if !(15..=300).contains(&self.seconds_per_turn) {
            return Err(ValidationError::out_of_range(
                "seconds_per_turn",
                15,
                300,
                self.seconds_per_turn as i64,
            ));
        }
        if self.scan_topics.is_empty() && self.deep_topics.is_empty() {
            return Err(ValidationError::empty_field("topics"));
        }
        if self.fallback_turns == 0 || self.fallback_turns > self.max_turns_per_topic {
            return Err(ValidationError::out_of_range(
                "fallback_turns",
                1,
                self.max_turns_per_topic as i64,
                self.fallback_turns as i64,
            ));
        }
        self.check_unique_ids()?;

        let total_turns = self.duration_minutes * 60 / self.seconds_per_turn;
        let topic_count = (self.scan_topics.len() + self.deep_topics.len()) as u32;
        let topic_time_budget_secs = self.duration_minutes * 60 / topic_count;

        // Scan topics get their fixed allocation; if the interview is too
        // short to cover it, they degrade to a single turn each.
        let scan_count = self.scan_topics.len() as u32;
        let scan_turns = if SCAN_TURNS_PER_TOPIC * scan_count > total_turns {
            1
        } else {
            SCAN_TURNS_PER_TOPIC
        };

        let scan = ScanPhase {
            topics: self
                .scan_topics
                .iter()
                .map(|(id, label)| TopicBudget::new(id, label, scan_turns))
                .collect(),
        };

        let remaining = total_turns.saturating_sub(scan_turns * scan_count);
        let deep_topics = self.allocate_deep(remaining);

        Ok(InterviewPlan {
            meta: PlanMeta {
                duration_minutes: self.duration_minutes,
                seconds_per_turn: self.seconds_per_turn,
                topic_time_budget_secs,
            },
            scan,
            deep: DeepPhase {
                topics: deep_topics,
                max_turns_per_topic: self.max_turns_per_topic,
                fallback_turns: self.fallback_turns,
            },
        })
    }

    /// Splits the remaining budget across deep topics.
    ///
    /// Even share per topic, clamped to `[fallback_turns, max_turns_per_topic]`,
    /// with leftover turns handed to the earliest topics still under the cap.
    fn allocate_deep(&self, remaining: u32) -> Vec<TopicBudget> {
        let count = self.deep_topics.len() as u32;
        if count == 0 {
            return Vec::new();
        }

        let share = (remaining / count)
            .clamp(self.fallback_turns, self.max_turns_per_topic);
        let mut budgets: Vec<TopicBudget> = self
            .deep_topics
            .iter()
            .map(|(id, label)| TopicBudget::new(id, label, share))
            .collect();

        let mut leftover = remaining.saturating_sub(share * count);
        for budget in budgets.iter_mut() {
            if leftover == 0 {
                break;
            }
            if budget.max_turns < self.max_turns_per_topic {
                budget.max_turns += 1;
                leftover -= 1;
            }
        }

        budgets
    }

    fn check_unique_ids(&self) -> Result<(), ValidationError> {
        let mut seen = std::collections::HashSet::new();
        for (id, _) in self.scan_topics.iter().chain(self.deep_topics.iter()) {
            if id.trim().is_empty() {
                return Err(ValidationError::empty_field("topic_id"));
            }
            if !seen.insert(id.as_str()) {
                return Err(ValidationError::invalid_format(
                    "topic_id",
                    format!("duplicate topic id '{}'", id),
                ));
            }
        }
        Ok(())
    }
}
