//! GetProjectInsightsHandler - Aggregate a project's conversation analytics.
//!
//! Loads the 30-day summary window and runs the rule-based engine. A project
//! with no conversations gets an empty overview and no insights, not an
//! error.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ProjectId, Timestamp};
use crate::domain::insights::{AnalyticsEngine, Insight, ProjectOverview};
use crate::ports::ConversationReader;

/// Query for a project's insight report.
#[derive(Debug, Clone)]
pub struct GetProjectInsightsQuery {
    pub project_id: ProjectId,
}

/// Result: the aggregate overview plus derived insights.
#[derive(Debug, Clone)]
pub struct GetProjectInsightsResult {
    pub overview: ProjectOverview,
    pub insights: Vec<Insight>,
}

/// Handler for project insights.
pub struct GetProjectInsightsHandler {
    conversations: Arc<dyn ConversationReader>,
    engine: AnalyticsEngine,
}

impl GetProjectInsightsHandler {
    pub fn new(conversations: Arc<dyn ConversationReader>) -> Self {
        Self {
            conversations,
            engine: AnalyticsEngine::new(),
        }
    }

    pub async fn handle(
        &self,
        query: GetProjectInsightsQuery,
    ) -> Result<GetProjectInsightsResult, DomainError> {
        let now = Timestamp::now();
        let summaries = self
            .conversations
            .summaries_for_project(&query.project_id, Timestamp::days_ago(30))
            .await?;

        let overview = self.engine.overview(&summaries, now);
        let insights = self.engine.insights(&overview);

        Ok(GetProjectInsightsResult { overview, insights })
    }
}
