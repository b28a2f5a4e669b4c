//! Plan handlers - generation, effective-plan reads, override updates.

mod generate_plan;
mod get_effective_plan;
mod update_overrides;

pub use generate_plan::{
    GeneratePlanCommand, GeneratePlanError, GeneratePlanHandler, GeneratePlanResult, TopicSpec,
};
pub use get_effective_plan::{
    GetEffectivePlanError, GetEffectivePlanHandler, GetEffectivePlanQuery, GetEffectivePlanResult,
};
pub use update_overrides::{
    UpdatePlanOverridesCommand, UpdatePlanOverridesError, UpdatePlanOverridesHandler,
    UpdatePlanOverridesResult,
};
