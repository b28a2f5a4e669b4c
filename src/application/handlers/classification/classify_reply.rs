//! ClassifyReplyHandler - Classify a short reply as ACCEPT, REFUSE, or NEUTRAL.
//!
//! Two-stage: the deterministic Italian fast path runs first and never calls
//! the model; only ambiguous replies reach the LLM. Classification can never
//! fail the caller: any gateway error degrades to NEUTRAL so the interview
//! keeps moving.

use std::sync::Arc;

use crate::domain::intent::{classify_fast, Intent, IntentContext};
use crate::ports::{ChatRole, CompletionRequest, LlmGateway};

/// Command to classify one user reply.
#[derive(Debug, Clone)]
pub struct ClassifyReplyCommand {
    pub context: IntentContext,
    pub text: String,
}

/// Result of classifying a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyReplyResult {
    pub intent: Intent,
    /// True when the fast path decided without a model call.
    pub used_fast_path: bool,
}

/// Handler for reply classification.
pub struct ClassifyReplyHandler<G: ?Sized + LlmGateway> {
    gateway: Arc<G>,
    model: String,
}

impl<G: ?Sized + LlmGateway> ClassifyReplyHandler<G> {
    pub fn new(gateway: Arc<G>, model: impl Into<String>) -> Self {
        Self {
            gateway,
            model: model.into(),
        }
    }

    /// Classifies the reply. Infallible: gateway errors become NEUTRAL.
    pub async fn handle(&self, cmd: ClassifyReplyCommand) -> ClassifyReplyResult {
        if let Some(intent) = classify_fast(cmd.context, &cmd.text) {
            return ClassifyReplyResult {
                intent,
                used_fast_path: true,
            };
        }

        let intent = match self.classify_with_model(cmd.context, &cmd.text).await {
            Ok(intent) => intent,
            Err(reason) => {
                tracing::warn!(reason = %reason, "reply classification fell back to NEUTRAL");
                Intent::Neutral
            }
        };

        ClassifyReplyResult {
            intent,
            used_fast_path: false,
        }
    }

    async fn classify_with_model(
        &self,
        context: IntentContext,
        text: &str,
    ) -> Result<Intent, String> {
        let system_prompt = format!(
            "You classify a short Italian reply from a business interview.\n\
             Context: {}\n\
             Answer with exactly one word: ACCEPT, REFUSE, or NEUTRAL.\n\
             ACCEPT means the user agrees to the question asked.\n\
             REFUSE means the user declines it.\n\
             NEUTRAL means anything else, including off-topic answers.",
            context.prompt_question()
        );

        let request = CompletionRequest::new(&self.model)
            .with_message(ChatRole::System, system_prompt)
            .with_message(ChatRole::User, text)
            .with_temperature(0.0)
            .with_max_tokens(4);

        let response = self
            .gateway
            .complete(request)
            .await
            .map_err(|e| e.to_string())?;

        parse_intent(&response.content).ok_or_else(|| {
            format!("unexpected classifier output: {:?}", response.content.trim())
        })
    }
}

fn parse_intent(content: &str) -> Option<Intent> {
    let label: String = content
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_uppercase();
    match label.as_str() {
        "ACCEPT" => Some(Intent::Accept),
        "REFUSE" => Some(Intent::Refuse),
        "NEUTRAL" => Some(Intent::Neutral),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::llm::MockLlmGateway;

    fn handler(mock: Arc<MockLlmGateway>) -> ClassifyReplyHandler<MockLlmGateway> {
        ClassifyReplyHandler::new(mock, "gpt-4o-mini")
    }

    #[tokio::test]
    async fn canonical_phrase_skips_the_model() {
        let mock = Arc::new(MockLlmGateway::new());
        let result = handler(mock.clone())
            .handle(ClassifyReplyCommand {
                context: IntentContext::Consent,
                text: "va bene".to_string(),
            })
            .await;

        assert_eq!(result.intent, Intent::Accept);
        assert!(result.used_fast_path);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn ambiguous_reply_uses_the_model() {
        let mock = Arc::new(MockLlmGateway::new());
        mock.push_response("REFUSE");

        let result = handler(mock.clone())
            .handle(ClassifyReplyCommand {
                context: IntentContext::Extension,
                text: "guarda, ho davvero poco tempo oggi".to_string(),
            })
            .await;

        assert_eq!(result.intent, Intent::Refuse);
        assert!(!result.used_fast_path);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn gateway_failure_degrades_to_neutral() {
        let mock = Arc::new(MockLlmGateway::new());
        mock.push_unavailable();

        let result = handler(mock)
            .handle(ClassifyReplyCommand {
                context: IntentContext::StopConfirmation,
                text: "dipende da quanto manca".to_string(),
            })
            .await;

        assert_eq!(result.intent, Intent::Neutral);
    }

    #[tokio::test]
    async fn garbage_model_output_degrades_to_neutral() {
        let mock = Arc::new(MockLlmGateway::new());
        mock.push_response("I think the user probably agrees");

        let result = handler(mock)
            .handle(ClassifyReplyCommand {
                context: IntentContext::Consent,
                text: "mah, vediamo".to_string(),
            })
            .await;

        assert_eq!(result.intent, Intent::Neutral);
    }

    #[test]
    fn parse_intent_tolerates_punctuation() {
        assert_eq!(parse_intent(" accept.\n"), Some(Intent::Accept));
        assert_eq!(parse_intent("\"NEUTRAL\""), Some(Intent::Neutral));
        assert_eq!(parse_intent("ACCEPT or REFUSE"), None);
    }
}
