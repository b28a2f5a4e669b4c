//! Cross-source insight aggregation.
//!
//! Rule-based correlation over pre-computed theme and sentiment fields from
//! chatbot and interview conversations. Thresholds are fixed constants; no
//! model calls happen here.

mod engine;
mod summary;

pub use engine::{
    AnalyticsEngine, Insight, InsightKind, ProjectOverview, ThemeStat, TrendDirection,
};
pub use summary::{ConversationSource, ConversationSummary, ThemeMention};
