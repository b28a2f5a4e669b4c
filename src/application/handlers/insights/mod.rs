//! Insight handlers.

mod get_project_insights;

pub use get_project_insights::{
    GetProjectInsightsHandler, GetProjectInsightsQuery, GetProjectInsightsResult,
};
