//! ExtractFieldHandler - Pull one contact field out of a free-form reply.
//!
//! One field per call, JSON-mode model output, and a hard rule against
//! inference: the model may only return what the user literally said.
//! Any failure yields the empty extraction, never an error.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::intent::{Confidence, ExtractedField, FieldKind};
use crate::ports::{ChatRole, CompletionRequest, LlmGateway};

/// Command to extract one field from a reply.
#[derive(Debug, Clone)]
pub struct ExtractFieldCommand {
    pub kind: FieldKind,
    pub text: String,
}

/// Handler for single-field extraction.
pub struct ExtractFieldHandler<G: ?Sized + LlmGateway> {
    gateway: Arc<G>,
    model: String,
}

impl<G: ?Sized + LlmGateway> ExtractFieldHandler<G> {
    pub fn new(gateway: Arc<G>, model: impl Into<String>) -> Self {
        Self {
            gateway,
            model: model.into(),
        }
    }

    /// Extracts the field. Infallible: failures yield the empty extraction.
    pub async fn handle(&self, cmd: ExtractFieldCommand) -> ExtractedField {
        match self.extract_with_model(cmd.kind, &cmd.text).await {
            Ok(field) => field,
            Err(reason) => {
                tracing::warn!(
                    field = cmd.kind.as_str(),
                    reason = %reason,
                    "field extraction fell back to empty"
                );
                ExtractedField::none()
            }
        }
    }

    async fn extract_with_model(
        &self,
        kind: FieldKind,
        text: &str,
    ) -> Result<ExtractedField, String> {
        let system_prompt = format!(
            "You extract exactly one field from an Italian reply: {}.\n\
             {}\n\
             Only extract what the user literally stated; never guess or infer.\n\
             Respond with a JSON object: {{\"value\": string or null, \
             \"confidence\": \"high\" or \"low\" or \"none\"}}.\n\
             When the field is absent, use null and \"none\".",
            kind.as_str(),
            kind.extraction_rules()
        );

        let request = CompletionRequest::new(&self.model)
            .with_message(ChatRole::System, system_prompt)
            .with_message(ChatRole::User, text)
            .with_temperature(0.0)
            .with_max_tokens(100)
            .with_json_mode();

        let response = self
            .gateway
            .complete(request)
            .await
            .map_err(|e| e.to_string())?;

        let parsed: WireExtraction = serde_json::from_str(response.content.trim())
            .map_err(|e| format!("unparseable extraction output: {}", e))?;

        let confidence = match parsed.confidence.as_deref() {
            Some("high") => Confidence::High,
            Some("low") => Confidence::Low,
            _ => Confidence::None,
        };

        let value = parsed
            .value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if value.is_none() {
            return Ok(ExtractedField::none());
        }

        Ok(ExtractedField::new(value, confidence))
    }
}

#[derive(Debug, Deserialize)]
struct WireExtraction {
    value: Option<String>,
    confidence: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::llm::MockLlmGateway;

    fn handler(mock: Arc<MockLlmGateway>) -> ExtractFieldHandler<MockLlmGateway> {
        ExtractFieldHandler::new(mock, "gpt-4o-mini")
    }

    #[tokio::test]
    async fn extracts_stated_value() {
        let mock = Arc::new(MockLlmGateway::new());
        mock.push_response(r#"{"value": "Giulia", "confidence": "high"}"#);

        let field = handler(mock)
            .handle(ExtractFieldCommand {
                kind: FieldKind::FirstName,
                text: "mi chiamo Giulia".to_string(),
            })
            .await;

        assert_eq!(field.value.as_deref(), Some("Giulia"));
        assert_eq!(field.confidence, Confidence::High);
    }

    #[tokio::test]
    async fn absent_field_is_empty() {
        let mock = Arc::new(MockLlmGateway::new());
        mock.push_response(r#"{"value": null, "confidence": "none"}"#);

        let field = handler(mock)
            .handle(ExtractFieldCommand {
                kind: FieldKind::Phone,
                text: "vi scrivo domani".to_string(),
            })
            .await;

        assert_eq!(field, ExtractedField::none());
    }

    #[tokio::test]
    async fn gateway_failure_yields_empty_extraction() {
        let mock = Arc::new(MockLlmGateway::new());
        mock.push_timeout();

        let field = handler(mock)
            .handle(ExtractFieldCommand {
                kind: FieldKind::Email,
                text: "giulia@esempio.it".to_string(),
            })
            .await;

        assert_eq!(field, ExtractedField::none());
    }

    #[tokio::test]
    async fn unparseable_output_yields_empty_extraction() {
        let mock = Arc::new(MockLlmGateway::new());
        mock.push_response("the name is Giulia");

        let field = handler(mock)
            .handle(ExtractFieldCommand {
                kind: FieldKind::FirstName,
                text: "mi chiamo Giulia".to_string(),
            })
            .await;

        assert_eq!(field, ExtractedField::none());
    }

    #[tokio::test]
    async fn prompt_names_the_field_and_forbids_inference() {
        let mock = Arc::new(MockLlmGateway::new());
        mock.push_response(r#"{"value": null, "confidence": "none"}"#);

        handler(mock.clone())
            .handle(ExtractFieldCommand {
                kind: FieldKind::FirstName,
                text: "giulia.rossi@esempio.it".to_string(),
            })
            .await;

        let prompt = &mock.requests()[0].messages[0].content;
        assert!(prompt.contains("first_name"));
        assert!(prompt.contains("never guess or infer"));
    }
}
