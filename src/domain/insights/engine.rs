//! The analytics engine: aggregates and heuristic insight rules.

use std::collections::BTreeMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::summary::ConversationSummary;
use crate::domain::foundation::Timestamp;

/// Fixed aggregation window in days.
const WINDOW_DAYS: i64 = 30;

/// A theme must appear more often than this to drive an insight.
const THEME_FREQUENCY_THRESHOLD: u32 = 3;

/// Average theme sentiment above this reads as positive.
const POSITIVE_SENTIMENT_THRESHOLD: f32 = 0.2;

/// Average theme sentiment below this reads as negative.
const NEGATIVE_SENTIMENT_THRESHOLD: f32 = -0.2;

/// Completion rate below this triggers a drop-off warning.
const LOW_COMPLETION_RATE: f32 = 0.5;

/// Relative change below this counts as flat.
const TREND_EPSILON: f32 = 0.1;

/// Direction of a windowed trend (first half vs second half).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Falling,
    Flat,
}

/// Frequency and average sentiment of one theme across the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeStat {
    pub name: String,
    pub frequency: u32,
    pub avg_sentiment: f32,
}

/// Aggregate stats for a project over the 30-day window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOverview {
    pub conversation_count: usize,
    pub avg_sentiment: f32,
    pub completion_rate: f32,
    pub avg_nps: Option<f32>,
    pub avg_duration_secs: f32,
    pub duration_trend: TrendDirection,
    pub volume_trend: TrendDirection,
    /// Themes sorted by frequency, most frequent first.
    pub themes: Vec<ThemeStat>,
}

/// Kind of heuristic suggestion derived from the overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// A frequently-discussed positive theme worth promoting.
    MarketingSuggestion,
    /// A frequent negative-sentiment theme pointing at a knowledge gap.
    KnowledgeGap,
    /// Too many conversations end before completion.
    DropOffWarning,
    /// Conversations are getting shorter while volume grows.
    RushedConversations,
}

/// A derived suggestion for the project owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    /// Theme the insight refers to, when theme-driven.
    pub theme: Option<String>,
    pub message: String,
}

/// Rule-based correlation over conversation summaries.
///
/// Stateless; all methods are pure over their inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Computes aggregate stats for summaries within the 30-day window
    /// ending at `now`. Summaries outside the window are ignored.
    pub fn overview(&self, summaries: &[ConversationSummary], now: Timestamp) -> ProjectOverview {
        let window_start =
            Timestamp::from_datetime(*now.as_datetime() - Duration::days(WINDOW_DAYS));
        let midpoint =
            Timestamp::from_datetime(*now.as_datetime() - Duration::days(WINDOW_DAYS / 2));

        let in_window: Vec<&ConversationSummary> = summaries
            .iter()
            .filter(|s| s.started_at >= window_start && s.started_at <= now)
            .collect();

        if in_window.is_empty() {
            return ProjectOverview {
                conversation_count: 0,
                avg_sentiment: 0.0,
                completion_rate: 0.0,
                avg_nps: None,
                avg_duration_secs: 0.0,
                duration_trend: TrendDirection::Flat,
                volume_trend: TrendDirection::Flat,
                themes: Vec::new(),
            };
        }

        let count = in_window.len();
        let avg_sentiment = in_window.iter().map(|s| s.sentiment).sum::<f32>() / count as f32;
        let completed = in_window.iter().filter(|s| s.completed).count();
        let completion_rate = completed as f32 / count as f32;
        let avg_duration_secs =
            in_window.iter().map(|s| s.duration_secs as f32).sum::<f32>() / count as f32;

        let nps_answers: Vec<f32> = in_window
            .iter()
            .filter_map(|s| s.nps.map(|n| n as f32))
            .collect();
        let avg_nps = if nps_answers.is_empty() {
            None
        } else {
            Some(nps_answers.iter().sum::<f32>() / nps_answers.len() as f32)
        };

        let (first, second): (Vec<&ConversationSummary>, Vec<&ConversationSummary>) =
            in_window.iter().copied().partition(|s| s.started_at < midpoint);
        let duration_trend = trend(
            avg_of(&first, |s| s.duration_secs as f32),
            avg_of(&second, |s| s.duration_secs as f32),
        );
        let volume_trend = trend(first.len() as f32, second.len() as f32);

        ProjectOverview {
            conversation_count: count,
            avg_sentiment,
            completion_rate,
            avg_nps,
            avg_duration_secs,
            duration_trend,
            volume_trend,
            themes: theme_stats(&in_window),
        }
    }

    /// Derives heuristic insights from an overview. Empty overviews yield
    /// no insights.
    pub fn insights(&self, overview: &ProjectOverview) -> Vec<Insight> {
        if overview.conversation_count == 0 {
            return Vec::new();
        }

        let mut insights = Vec::new();

        for theme in &overview.themes {
            if theme.frequency <= THEME_FREQUENCY_THRESHOLD {
                continue;
            }
            if theme.avg_sentiment > POSITIVE_SENTIMENT_THRESHOLD {
                insights.push(Insight {
                    kind: InsightKind::MarketingSuggestion,
                    theme: Some(theme.name.clone()),
                    message: format!(
                        "'{}' comes up often with positive sentiment; consider \
                         featuring it in marketing material",
                        theme.name
                    ),
                });
            } else if theme.avg_sentiment < NEGATIVE_SENTIMENT_THRESHOLD {
                insights.push(Insight {
                    kind: InsightKind::KnowledgeGap,
                    theme: Some(theme.name.clone()),
                    message: format!(
                        "'{}' comes up often with negative sentiment; the knowledge \
                         base may be missing answers for it",
                        theme.name
                    ),
                });
            }
        }

        if overview.completion_rate < LOW_COMPLETION_RATE {
            insights.push(Insight {
                kind: InsightKind::DropOffWarning,
                theme: None,
                message: format!(
                    "Only {:.0}% of conversations complete; review the opening flow",
                    overview.completion_rate * 100.0
                ),
            });
        }

        if overview.duration_trend == TrendDirection::Falling
            && overview.volume_trend == TrendDirection::Rising
        {
            insights.push(Insight {
                kind: InsightKind::RushedConversations,
                theme: None,
                message: "Conversations are getting shorter while volume grows; \
                          answers may be getting rushed"
                    .to_string(),
            });
        }

        insights
    }
}

fn avg_of(summaries: &[&ConversationSummary], f: impl Fn(&ConversationSummary) -> f32) -> f32 {
    if summaries.is_empty() {
        return 0.0;
    }
    summaries.iter().map(|s| f(s)).sum::<f32>() / summaries.len() as f32
}

fn trend(first_half: f32, second_half: f32) -> TrendDirection {
    if first_half == 0.0 {
        return if second_half > 0.0 {
            TrendDirection::Rising
        } else {
            TrendDirection::Flat
        };
    }
    let change = (second_half - first_half) / first_half;
    if change > TREND_EPSILON {
        TrendDirection::Rising
    } else if change < -TREND_EPSILON {
        TrendDirection::Falling
    } else {
        TrendDirection::Flat
    }
}

fn theme_stats(summaries: &[&ConversationSummary]) -> Vec<ThemeStat> {
    let mut acc: BTreeMap<&str, (u32, f32)> = BTreeMap::new();
    for summary in summaries {
        for mention in &summary.themes {
            let entry = acc.entry(mention.name.as_str()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += mention.sentiment;
        }
    }
    let mut stats: Vec<ThemeStat> = acc
        .into_iter()
        .map(|(name, (frequency, sum))| ThemeStat {
            name: name.to_string(),
            frequency,
            avg_sentiment: sum / frequency as f32,
        })
        .collect();
    stats.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.name.cmp(&b.name)));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ProjectId;
    use crate::domain::insights::{ConversationSource, ThemeMention};

    fn summary(days_ago: i64, themes: Vec<ThemeMention>) -> ConversationSummary {
        ConversationSummary {
            project_id: ProjectId::new(),
            source: ConversationSource::Chatbot,
            started_at: Timestamp::days_ago(days_ago),
            duration_secs: 300,
            completed: true,
            sentiment: 0.3,
            nps: Some(8),
            themes,
        }
    }

    fn engine() -> AnalyticsEngine {
        AnalyticsEngine::new()
    }

    #[test]
    fn empty_input_yields_empty_overview_and_no_insights() {
        let overview = engine().overview(&[], Timestamp::now());
        assert_eq!(overview.conversation_count, 0);
        assert!(engine().insights(&overview).is_empty());
    }

    #[test]
    fn summaries_outside_the_window_are_ignored() {
        let summaries = vec![summary(45, vec![]), summary(5, vec![])];
        let overview = engine().overview(&summaries, Timestamp::now());
        assert_eq!(overview.conversation_count, 1);
    }

    #[test]
    fn computes_basic_aggregates() {
        let mut incomplete = summary(3, vec![]);
        incomplete.completed = false;
        incomplete.nps = None;
        let summaries = vec![summary(2, vec![]), incomplete];

        let overview = engine().overview(&summaries, Timestamp::now());
        assert_eq!(overview.conversation_count, 2);
        assert!((overview.completion_rate - 0.5).abs() < f32::EPSILON);
        assert_eq!(overview.avg_nps, Some(8.0));
    }

    #[test]
    fn frequent_positive_theme_becomes_marketing_suggestion() {
        let summaries: Vec<_> = (0..4)
            .map(|i| summary(i + 1, vec![ThemeMention::new("spedizione veloce", 0.6)]))
            .collect();

        let overview = engine().overview(&summaries, Timestamp::now());
        let insights = engine().insights(&overview);
        assert!(insights
            .iter()
            .any(|i| i.kind == InsightKind::MarketingSuggestion
                && i.theme.as_deref() == Some("spedizione veloce")));
    }

    #[test]
    fn frequent_negative_theme_becomes_knowledge_gap() {
        let summaries: Vec<_> = (0..4)
            .map(|i| summary(i + 1, vec![ThemeMention::new("resi", -0.5)]))
            .collect();

        let overview = engine().overview(&summaries, Timestamp::now());
        let insights = engine().insights(&overview);
        assert!(insights
            .iter()
            .any(|i| i.kind == InsightKind::KnowledgeGap && i.theme.as_deref() == Some("resi")));
    }

    #[test]
    fn theme_at_threshold_frequency_is_not_enough() {
        let summaries: Vec<_> = (0..3)
            .map(|i| summary(i + 1, vec![ThemeMention::new("prezzi", 0.6)]))
            .collect();

        let overview = engine().overview(&summaries, Timestamp::now());
        let insights = engine().insights(&overview);
        assert!(!insights
            .iter()
            .any(|i| i.kind == InsightKind::MarketingSuggestion));
    }

    #[test]
    fn low_completion_rate_triggers_drop_off_warning() {
        let mut dropped = summary(2, vec![]);
        dropped.completed = false;
        let mut dropped2 = summary(3, vec![]);
        dropped2.completed = false;
        let summaries = vec![summary(1, vec![]), dropped, dropped2];

        let overview = engine().overview(&summaries, Timestamp::now());
        let insights = engine().insights(&overview);
        assert!(insights.iter().any(|i| i.kind == InsightKind::DropOffWarning));
    }

    #[test]
    fn falling_duration_with_rising_volume_flags_rushed_conversations() {
        // Older half: one long conversation. Recent half: three short ones.
        let mut old = summary(25, vec![]);
        old.duration_secs = 900;
        let mut recent: Vec<_> = (0..3).map(|i| summary(i + 1, vec![])).collect();
        for s in recent.iter_mut() {
            s.duration_secs = 120;
        }
        let mut summaries = vec![old];
        summaries.append(&mut recent);

        let overview = engine().overview(&summaries, Timestamp::now());
        assert_eq!(overview.duration_trend, TrendDirection::Falling);
        assert_eq!(overview.volume_trend, TrendDirection::Rising);

        let insights = engine().insights(&overview);
        assert!(insights
            .iter()
            .any(|i| i.kind == InsightKind::RushedConversations));
    }

    #[test]
    fn themes_are_sorted_by_frequency() {
        let summaries = vec![
            summary(1, vec![ThemeMention::new("a", 0.1), ThemeMention::new("b", 0.1)]),
            summary(2, vec![ThemeMention::new("b", 0.3)]),
        ];
        let overview = engine().overview(&summaries, Timestamp::now());
        assert_eq!(overview.themes[0].name, "b");
        assert_eq!(overview.themes[0].frequency, 2);
    }
}
