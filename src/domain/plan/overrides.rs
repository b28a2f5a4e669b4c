//! Sparse user overrides merged onto a generated plan.
//!
//! Overrides pin per-topic turn counts (and the deep-phase globals) to a
//! user-chosen value. A missing entry means "automatic": the generated base
//! value applies. Clearing an override removes the entry, so re-applying
//! yields the base plan exactly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::plan::{InterviewPlan, TopicBudget};
use crate::domain::foundation::ValidationError;

/// Upper bound accepted for any explicit turn override.
const MAX_OVERRIDE_TURNS: u32 = 50;

/// Sparse per-topic turn-count overrides for an interview plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlanOverrides {
    /// Per-topic `max_turns` overrides, keyed by topic id.
    #[serde(default)]
    pub topic_turns: BTreeMap<String, u32>,

    /// Override for the deep-phase per-topic cap.
    #[serde(default)]
    pub max_turns_per_topic: Option<u32>,

    /// Override for the deep-phase fallback allocation.
    #[serde(default)]
    pub fallback_turns: Option<u32>,
}

impl PlanOverrides {
    /// Creates an empty override set (everything automatic).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no override is set.
    pub fn is_empty(&self) -> bool {
        self.topic_turns.is_empty()
            && self.max_turns_per_topic.is_none()
            && self.fallback_turns.is_none()
    }

    /// Pins a topic to an explicit turn count.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` unless `turns` is a positive integer within
    /// the accepted range.
    pub fn set_topic_turns(
        &mut self,
        topic_id: impl Into<String>,
        turns: u32,
    ) -> Result<(), ValidationError> {
        validate_turns("topic_turns", turns)?;
        self.topic_turns.insert(topic_id.into(), turns);
        Ok(())
    }

    /// Clears a topic override, restoring the automatic value.
    pub fn clear_topic_turns(&mut self, topic_id: &str) {
        self.topic_turns.remove(topic_id);
    }

    /// Pins the deep-phase per-topic cap.
    pub fn set_max_turns_per_topic(&mut self, turns: u32) -> Result<(), ValidationError> {
        validate_turns("max_turns_per_topic", turns)?;
        self.max_turns_per_topic = Some(turns);
        Ok(())
    }

    /// Clears the deep-phase cap override.
    pub fn clear_max_turns_per_topic(&mut self) {
        self.max_turns_per_topic = None;
    }

    /// Pins the deep-phase fallback allocation.
    pub fn set_fallback_turns(&mut self, turns: u32) -> Result<(), ValidationError> {
        validate_turns("fallback_turns", turns)?;
        self.fallback_turns = Some(turns);
        Ok(())
    }

    /// Clears the deep-phase fallback override.
    pub fn clear_fallback_turns(&mut self) {
        self.fallback_turns = None;
    }

    /// Merges these overrides onto a base plan, producing the effective plan.
    ///
    /// For every topic the effective `max_turns` is the override when one is
    /// set, otherwise the base value. Overrides for topic ids not present in
    /// the base plan are ignored. Applying the same overrides twice yields
    /// the same effective plan.
    pub fn apply(&self, base: &InterviewPlan) -> InterviewPlan {
        let mut effective = base.clone();

        for topic in effective
            .scan
            .topics
            .iter_mut()
            .chain(effective.deep.topics.iter_mut())
        {
            if let Some(turns) = self.topic_turns.get(&topic.id) {
                topic.max_turns = *turns;
            }
        }

        if let Some(cap) = self.max_turns_per_topic {
            effective.deep.max_turns_per_topic = cap;
        }
        if let Some(fallback) = self.fallback_turns {
            effective.deep.fallback_turns = fallback;
        }

        effective
    }

    /// Effective turn count for one topic without building the whole plan.
    pub fn effective_turns(&self, base: &TopicBudget) -> u32 {
        self.topic_turns
            .get(&base.id)
            .copied()
            .unwrap_or(base.max_turns)
    }
}

fn validate_turns(field: &str, turns: u32) -> Result<(), ValidationError> {
    if turns == 0 || turns > MAX_OVERRIDE_TURNS {
        return Err(ValidationError::out_of_range(
            field,
            1,
            MAX_OVERRIDE_TURNS as i64,
            turns as i64,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::PlanBuilder;
    use proptest::prelude::*;

    fn base_plan() -> InterviewPlan {
        PlanBuilder::new(20, 60)
            .with_scan_topic("brand", "Brand positioning")
            .with_scan_topic("customers", "Customer base")
            .with_deep_topic("pricing", "Pricing strategy")
            .with_deep_topic("channels", "Sales channels")
            .build()
            .unwrap()
    }

    #[test]
    fn override_replaces_base_turn_count() {
        let base = base_plan();
        let mut overrides = PlanOverrides::new();
        overrides.set_topic_turns("pricing", 12).unwrap();

        let effective = overrides.apply(&base);
        assert_eq!(effective.topic("pricing").unwrap().max_turns, 12);
        // Untouched topics keep the base value.
        assert_eq!(
            effective.topic("channels").unwrap().max_turns,
            base.topic("channels").unwrap().max_turns
        );
    }

    #[test]
    fn deep_globals_follow_override_or_base_rule() {
        let base = base_plan();
        let mut overrides = PlanOverrides::new();
        overrides.set_max_turns_per_topic(10).unwrap();

        let effective = overrides.apply(&base);
        assert_eq!(effective.deep.max_turns_per_topic, 10);
        assert_eq!(effective.deep.fallback_turns, base.deep.fallback_turns);
    }

    #[test]
    fn clearing_override_restores_base_exactly() {
        let base = base_plan();
        let mut overrides = PlanOverrides::new();
        overrides.set_topic_turns("pricing", 12).unwrap();
        overrides.set_fallback_turns(4).unwrap();

        overrides.clear_topic_turns("pricing");
        overrides.clear_fallback_turns();

        assert!(overrides.is_empty());
        assert_eq!(overrides.apply(&base), base);
    }

    #[test]
    fn zero_turns_is_rejected() {
        let mut overrides = PlanOverrides::new();
        assert!(overrides.set_topic_turns("pricing", 0).is_err());
        assert!(overrides.set_max_turns_per_topic(0).is_err());
    }

    #[test]
    fn excessive_turns_is_rejected() {
        let mut overrides = PlanOverrides::new();
        assert!(overrides.set_topic_turns("pricing", 51).is_err());
    }

    #[test]
    fn unknown_topic_override_is_ignored() {
        let base = base_plan();
        let mut overrides = PlanOverrides::new();
        overrides.set_topic_turns("nonexistent", 9).unwrap();

        assert_eq!(overrides.apply(&base), base);
    }

    #[test]
    fn apply_is_idempotent() {
        let base = base_plan();
        let mut overrides = PlanOverrides::new();
        overrides.set_topic_turns("brand", 5).unwrap();
        overrides.set_max_turns_per_topic(10).unwrap();

        let once = overrides.apply(&base);
        let twice = overrides.apply(&once);
        assert_eq!(once, twice);
    }

    proptest! {
        #[test]
        fn apply_is_idempotent_for_any_override_set(
            brand in 1u32..=50,
            pricing in 1u32..=50,
            cap in proptest::option::of(1u32..=50),
            fallback in proptest::option::of(1u32..=50),
        ) {
            let base = base_plan();
            let mut overrides = PlanOverrides::new();
            overrides.set_topic_turns("brand", brand).unwrap();
            overrides.set_topic_turns("pricing", pricing).unwrap();
            if let Some(cap) = cap {
                overrides.set_max_turns_per_topic(cap).unwrap();
            }
            if let Some(fallback) = fallback {
                overrides.set_fallback_turns(fallback).unwrap();
            }

            let once = overrides.apply(&base);
            let twice = overrides.apply(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
