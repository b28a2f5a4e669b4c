//! HTTP DTOs for interview endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::interview::{InterviewPhase, InterviewSession, MessageRole, TopicStatus};

/// Request to start an interview.
#[derive(Debug, Clone, Deserialize)]
pub struct StartInterviewRequest {
    pub bot_id: uuid::Uuid,
}

/// Request carrying one user message.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// One transcript entry.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub role: MessageRole,
    pub content: String,
    pub sent_at: String,
}

/// One recorded topic evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct TopicResultResponse {
    pub topic_id: String,
    pub status: TopicStatus,
    pub score: f32,
}

/// Interview representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewResponse {
    pub id: String,
    pub bot_id: String,
    pub phase: InterviewPhase,
    pub topic_index: usize,
    pub turns_in_topic: u32,
    pub results: Vec<TopicResultResponse>,
    pub messages: Vec<MessageResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&InterviewSession> for InterviewResponse {
    fn from(session: &InterviewSession) -> Self {
        Self {
            id: session.id().to_string(),
            bot_id: session.bot_id().to_string(),
            phase: session.phase(),
            topic_index: session.topic_index(),
            turns_in_topic: session.turns_in_topic(),
            results: session
                .results()
                .iter()
                .map(|r| TopicResultResponse {
                    topic_id: r.topic_id.clone(),
                    status: r.status,
                    score: r.score,
                })
                .collect(),
            messages: session
                .messages()
                .iter()
                .map(|m| MessageResponse {
                    role: m.role,
                    content: m.content.clone(),
                    sent_at: m.sent_at.as_datetime().to_rfc3339(),
                })
                .collect(),
            created_at: session.created_at().as_datetime().to_rfc3339(),
            updated_at: session.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Response for a started interview: session state plus the greeting.
#[derive(Debug, Clone, Serialize)]
pub struct StartInterviewResponse {
    pub interview: InterviewResponse,
    pub greeting: String,
}

/// Response for a processed turn: the reply plus updated state.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageResponse {
    pub reply: String,
    pub interview: InterviewResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_message_request_deserializes() {
        let req: SendMessageRequest =
            serde_json::from_str(r#"{"message": "va bene"}"#).unwrap();
        assert_eq!(req.message, "va bene");
    }
}
