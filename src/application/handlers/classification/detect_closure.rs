//! DetectClosureHandler - Decide whether the user explicitly asked to stop.
//!
//! Closure is narrow by design: tiredness, short answers, or complaints are
//! not closure. Only an explicit request to conclude counts, and any model
//! failure produces the negative verdict so an interview never ends by
//! accident.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::intent::{ClosureSignal, Confidence};
use crate::ports::{ChatRole, CompletionRequest, LlmGateway};

/// Command to check one user message for an explicit closure request.
#[derive(Debug, Clone)]
pub struct DetectClosureCommand {
    /// The user's latest message.
    pub message: String,
    /// Up to a few preceding transcript lines for context.
    pub recent_context: Vec<String>,
}

/// Handler for closure detection.
pub struct DetectClosureHandler<G: ?Sized + LlmGateway> {
    gateway: Arc<G>,
    model: String,
}

impl<G: ?Sized + LlmGateway> DetectClosureHandler<G> {
    pub fn new(gateway: Arc<G>, model: impl Into<String>) -> Self {
        Self {
            gateway,
            model: model.into(),
        }
    }

    /// Detects closure. Infallible: failures yield the negative verdict.
    pub async fn handle(&self, cmd: DetectClosureCommand) -> ClosureSignal {
        match self.detect_with_model(&cmd).await {
            Ok(signal) => signal,
            Err(reason) => {
                tracing::warn!(reason = %reason, "closure detection fell back to negative");
                ClosureSignal::negative_default("classifier unavailable")
            }
        }
    }

    async fn detect_with_model(&self, cmd: &DetectClosureCommand) -> Result<ClosureSignal, String> {
        let system_prompt = "You watch an Italian business interview and decide whether the \
             user's latest message EXPLICITLY asks to end the interview now.\n\
             Being tired, brief, or annoyed is NOT a closure request.\n\
             Asking how long is left is NOT a closure request.\n\
             Respond with a JSON object: {\"wants_to_conclude\": boolean, \
             \"confidence\": \"high\" or \"low\", \"reasoning\": short string}.";

        let mut transcript = String::new();
        for line in &cmd.recent_context {
            transcript.push_str(line);
            transcript.push('\n');
        }
        transcript.push_str("Latest user message: ");
        transcript.push_str(&cmd.message);

        let request = CompletionRequest::new(&self.model)
            .with_message(ChatRole::System, system_prompt)
            .with_message(ChatRole::User, transcript)
            .with_temperature(0.0)
            .with_max_tokens(120)
            .with_json_mode();

        let response = self
            .gateway
            .complete(request)
            .await
            .map_err(|e| e.to_string())?;

        let parsed: WireClosure = serde_json::from_str(response.content.trim())
            .map_err(|e| format!("unparseable closure output: {}", e))?;

        let confidence = match parsed.confidence.as_deref() {
            Some("high") => Confidence::High,
            _ => Confidence::Low,
        };

        Ok(ClosureSignal::new(
            parsed.wants_to_conclude,
            confidence,
            parsed.reasoning.unwrap_or_default(),
        ))
    }
}

#[derive(Debug, Deserialize)]
struct WireClosure {
    wants_to_conclude: bool,
    confidence: Option<String>,
    reasoning: Option<String>,
}
