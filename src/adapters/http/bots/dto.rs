//! HTTP DTOs for bot and plan endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::bot::{Bot, BotKind};
use crate::domain::plan::{InterviewPlan, PlanOverrides, TopicBudget};

/// Request to create a bot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBotRequest {
    pub project_id: uuid::Uuid,
    pub name: String,
    pub kind: BotKind,
}

/// Request to update a bot. Omitted fields are left unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBotRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kb_enabled: Option<bool>,
}

/// Query string for bot listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListBotsParams {
    pub project_id: uuid::Uuid,
}

/// Request to generate a bot's base plan.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePlanRequest {
    pub duration_minutes: u32,
    pub seconds_per_turn: u32,
    #[serde(default)]
    pub scan_topics: Vec<TopicSpecRequest>,
    #[serde(default)]
    pub deep_topics: Vec<TopicSpecRequest>,
    #[serde(default)]
    pub max_turns_per_topic: Option<u32>,
    #[serde(default)]
    pub fallback_turns: Option<u32>,
}

/// One topic in a plan generation request.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicSpecRequest {
    pub id: String,
    pub label: String,
}

/// Request to update plan overrides.
///
/// `topic_turns` values may be `null` to clear a per-topic override. The
/// two cap fields distinguish "absent" (leave unchanged) from `null`
/// (clear the override).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOverridesRequest {
    #[serde(default)]
    pub topic_turns: BTreeMap<String, Option<u32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub max_turns_per_topic: Option<Option<u32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub fallback_turns: Option<Option<u32>>,
}

/// Distinguishes a missing key from an explicit `null`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u32>::deserialize(deserializer).map(Some)
}

/// Bot representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct BotResponse {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub kind: BotKind,
    pub kb_enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Bot> for BotResponse {
    fn from(bot: &Bot) -> Self {
        Self {
            id: bot.id().to_string(),
            project_id: bot.project_id().to_string(),
            name: bot.name().to_string(),
            kind: bot.kind(),
            kb_enabled: bot.kb_enabled(),
            created_at: bot.created_at().as_datetime().to_rfc3339(),
            updated_at: bot.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// One topic budget in a plan response.
#[derive(Debug, Clone, Serialize)]
pub struct TopicBudgetResponse {
    pub id: String,
    pub label: String,
    pub max_turns: u32,
}

impl From<&TopicBudget> for TopicBudgetResponse {
    fn from(topic: &TopicBudget) -> Self {
        Self {
            id: topic.id.clone(),
            label: topic.label.clone(),
            max_turns: topic.max_turns,
        }
    }
}

/// Flattened plan representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub topics: Vec<TopicBudgetResponse>,
    pub total_turn_budget: u32,
}

impl From<&InterviewPlan> for PlanResponse {
    fn from(plan: &InterviewPlan) -> Self {
        Self {
            topics: plan.ordered_topics().map(TopicBudgetResponse::from).collect(),
            total_turn_budget: plan.total_turn_budget(),
        }
    }
}

/// Full plan view: base, stored overrides, and the merged result.
#[derive(Debug, Clone, Serialize)]
pub struct EffectivePlanResponse {
    pub base: PlanResponse,
    pub overrides: PlanOverrides,
    pub effective: PlanResponse,
}

/// Result of an override update: what is stored and what it yields.
#[derive(Debug, Clone, Serialize)]
pub struct OverridesUpdateResponse {
    pub overrides: PlanOverrides,
    pub effective: PlanResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_bot_request_deserializes() {
        let json = r#"{"project_id": "7f1a0e7a-2f8e-4a8a-9f40-111111111111", "name": "Tuner", "kind": "interview"}"#;
        let req: CreateBotRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Tuner");
        assert_eq!(req.kind, BotKind::Interview);
    }

    #[test]
    fn overrides_request_distinguishes_null_from_absent() {
        let req: UpdateOverridesRequest =
            serde_json::from_str(r#"{"max_turns_per_topic": null}"#).unwrap();
        assert_eq!(req.max_turns_per_topic, Some(None));
        assert_eq!(req.fallback_turns, None);
    }

    #[test]
    fn overrides_request_parses_topic_map() {
        let req: UpdateOverridesRequest =
            serde_json::from_str(r#"{"topic_turns": {"clienti": 3, "prezzi": null}}"#).unwrap();
        assert_eq!(req.topic_turns["clienti"], Some(3));
        assert_eq!(req.topic_turns["prezzi"], None);
    }
}
