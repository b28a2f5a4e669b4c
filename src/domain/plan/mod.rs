//! Interview plan domain: phases, turn budgets, overrides.
//!
//! An interview plan is a generated turn-budget schedule with two phases:
//! a `scan` phase that touches every topic briefly, and a `deep` phase that
//! spends the remaining budget on the topics that matter. Users can pin
//! per-topic turn counts through sparse overrides merged onto the base plan.

mod builder;
mod overrides;
#[allow(clippy::module_inception)]
mod plan;

pub use builder::PlanBuilder;
pub use overrides::PlanOverrides;
pub use plan::{DeepPhase, InterviewPlan, PlanMeta, ScanPhase, TopicBudget};
