//! HTTP DTOs for insight endpoints.

use serde::Serialize;

use crate::domain::insights::{Insight, ProjectOverview};

/// Insight report for a project: aggregate stats plus suggestions.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInsightsResponse {
    pub overview: ProjectOverview,
    pub insights: Vec<Insight>,
}
