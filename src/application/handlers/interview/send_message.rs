//! SendMessageHandler - One turn of an AI-led interview.
//!
//! Orchestrates a single user message against the session state machine:
//! consent and stop-confirmation replies go through intent classification
//! (fast path first), every in-loop message is checked for an explicit
//! closure request, and a spent turn budget triggers topic evaluation and
//! advancement. Classification failures degrade to the neutral path; reply
//! generation failures are terminal for the request.

use std::sync::Arc;

use crate::application::handlers::classification::{
    ClassifyReplyCommand, ClassifyReplyHandler, DetectClosureCommand, DetectClosureHandler,
    ExtractFieldCommand, ExtractFieldHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode, InterviewId};
use crate::domain::intent::{Confidence, FieldKind, Intent, IntentContext};
use crate::domain::interview::{
    InterviewPhase, InterviewSession, MessageRole, TopicResult, TopicStatus,
};
use crate::ports::{ChatRole, CompletionRequest, InterviewRepository, LlmError, LlmGateway};

/// Question asked before ending the interview on a detected closure request.
pub const STOP_CONFIRMATION_PROMPT: &str =
    "Capisco, possiamo fermarci qui. Confermi di voler concludere l'intervista adesso?";

/// Closing message for a completed or stopped interview.
pub const FAREWELL: &str =
    "Grazie mille per il suo tempo, le sue risposte ci sono molto utili. A presto!";

/// Closing message when consent is refused.
const CONSENT_REFUSED_FAREWELL: &str =
    "Nessun problema, non registrerò nulla. Grazie comunque e buona giornata!";

/// Re-asked when the consent reply is unclear.
const CONSENT_CLARIFICATION: &str =
    "Mi scusi, non ho capito: posso registrare le sue risposte per migliorare il servizio?";

/// How many transcript lines the closure detector sees.
const CLOSURE_CONTEXT_LINES: usize = 4;

/// How many transcript messages the reply generator sees.
const GENERATION_WINDOW: usize = 20;

/// Command carrying one user message into an interview.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub interview_id: InterviewId,
    pub text: String,
}

/// Result of processing one interview turn.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub session: InterviewSession,
    /// The assistant's reply for this turn.
    pub reply: String,
}

/// Error type for interview turns.
#[derive(Debug)]
pub enum SendMessageError {
    /// Interview not found.
    InterviewNotFound(InterviewId),
    /// The interview is already completed.
    InterviewCompleted(InterviewId),
    /// Reply generation failed.
    Generation(LlmError),
    /// Domain error from the session or a port.
    Domain(DomainError),
}

impl std::fmt::Display for SendMessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendMessageError::InterviewNotFound(id) => {
                write!(f, "Interview not found: {}", id)
            }
            SendMessageError::InterviewCompleted(id) => {
                write!(f, "Interview already completed: {}", id)
            }
            SendMessageError::Generation(err) => write!(f, "Reply generation failed: {}", err),
            SendMessageError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SendMessageError {}

impl From<DomainError> for SendMessageError {
    fn from(err: DomainError) -> Self {
        SendMessageError::Domain(err)
    }
}

impl From<LlmError> for SendMessageError {
    fn from(err: LlmError) -> Self {
        SendMessageError::Generation(err)
    }
}

/// What the generator is asked to do for this turn.
enum ReplyInstruction {
    OpenTopic { label: String },
    Probe { label: String },
    Resume,
}

/// Handler for interview turns.
pub struct SendMessageHandler {
    interviews: Arc<dyn InterviewRepository>,
    gateway: Arc<dyn LlmGateway>,
    generation_model: String,
    classifier: ClassifyReplyHandler<dyn LlmGateway>,
    closure: DetectClosureHandler<dyn LlmGateway>,
    extractor: ExtractFieldHandler<dyn LlmGateway>,
}

impl SendMessageHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        gateway: Arc<dyn LlmGateway>,
        generation_model: impl Into<String>,
        classification_model: impl Into<String>,
    ) -> Self {
        let classification_model = classification_model.into();
        Self {
            interviews,
            classifier: ClassifyReplyHandler::new(gateway.clone(), classification_model.clone()),
            closure: DetectClosureHandler::new(gateway.clone(), classification_model.clone()),
            extractor: ExtractFieldHandler::new(gateway.clone(), classification_model),
            gateway,
            generation_model: generation_model.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        let mut session = self
            .interviews
            .find_by_id(&cmd.interview_id)
            .await?
            .ok_or(SendMessageError::InterviewNotFound(cmd.interview_id))?;

        if session.phase() == InterviewPhase::Completed {
            return Err(SendMessageError::InterviewCompleted(cmd.interview_id));
        }
        if session.phase() == InterviewPhase::Pending {
            return Err(SendMessageError::Domain(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Interview has not been opened yet",
            )));
        }

        // Decided before the message lands in the transcript.
        let awaiting_stop_confirmation = last_assistant_line(&session)
            .map(|line| line == STOP_CONFIRMATION_PROMPT)
            .unwrap_or(false);
        let awaiting_consent = session.phase() == InterviewPhase::Started;

        // A stop-confirmation answer is administrative, not topic content:
        // it must not spend the current topic's turn budget.
        if awaiting_stop_confirmation {
            session.add_user_interjection(&cmd.text)?;
        } else {
            session.add_user_message(&cmd.text)?;
        }

        let (reply, complete_after) = if awaiting_stop_confirmation {
            self.stop_confirmation_turn(&mut session, &cmd.text).await?
        } else if awaiting_consent {
            self.consent_turn(&mut session, &cmd.text).await?
        } else {
            self.topic_turn(&mut session, &cmd.text).await?
        };

        session.add_assistant_message(&reply)?;
        if complete_after {
            session.complete()?;
        }
        self.interviews.update(&session).await?;

        tracing::info!(
            interview_id = %session.id(),
            phase = ?session.phase(),
            topic_index = session.topic_index(),
            "processed interview turn"
        );

        Ok(SendMessageResult { session, reply })
    }

    /// The previous assistant turn asked whether to stop; read the answer.
    async fn stop_confirmation_turn(
        &self,
        session: &mut InterviewSession,
        text: &str,
    ) -> Result<(String, bool), SendMessageError> {
        let classified = self
            .classifier
            .handle(ClassifyReplyCommand {
                context: IntentContext::StopConfirmation,
                text: text.to_string(),
            })
            .await;

        match classified.intent {
            Intent::Accept => Ok((FAREWELL.to_string(), true)),
            // Unclear or refused: keep going with the current topic.
            Intent::Refuse | Intent::Neutral => {
                let reply = self
                    .generate_reply(session, ReplyInstruction::Resume)
                    .await?;
                Ok((reply, false))
            }
        }
    }

    /// First user reply after the consent greeting.
    async fn consent_turn(
        &self,
        session: &mut InterviewSession,
        text: &str,
    ) -> Result<(String, bool), SendMessageError> {
        let classified = self
            .classifier
            .handle(ClassifyReplyCommand {
                context: IntentContext::Consent,
                text: text.to_string(),
            })
            .await;

        match classified.intent {
            Intent::Refuse => Ok((CONSENT_REFUSED_FAREWELL.to_string(), true)),
            Intent::Neutral => Ok((CONSENT_CLARIFICATION.to_string(), false)),
            Intent::Accept => {
                session.add_system_message("consent: accepted")?;
                let name = self
                    .extractor
                    .handle(ExtractFieldCommand {
                        kind: FieldKind::FirstName,
                        text: text.to_string(),
                    })
                    .await;
                if let Some(value) = name.value {
                    session.add_system_message(format!("contact first_name: {}", value))?;
                }

                if !session.has_remaining_topics() {
                    return Ok((FAREWELL.to_string(), true));
                }
                let label = session.begin_next_topic()?.label.clone();
                let reply = self
                    .generate_reply(session, ReplyInstruction::OpenTopic { label })
                    .await?;
                Ok((reply, false))
            }
        }
    }

    /// A turn inside the topic loop (`Explaining` or `Quiz`).
    async fn topic_turn(
        &self,
        session: &mut InterviewSession,
        text: &str,
    ) -> Result<(String, bool), SendMessageError> {
        let signal = self
            .closure
            .handle(DetectClosureCommand {
                message: text.to_string(),
                recent_context: recent_lines(session, CLOSURE_CONTEXT_LINES),
            })
            .await;
        if signal.wants_to_conclude && signal.confidence == Confidence::High {
            return Ok((STOP_CONFIRMATION_PROMPT.to_string(), false));
        }

        if session.phase() == InterviewPhase::Explaining {
            let label = current_label(session);
            session.enter_quiz()?;
            let reply = self
                .generate_reply(session, ReplyInstruction::Probe { label })
                .await?;
            return Ok((reply, false));
        }

        // Quiz phase: evaluate and advance once the budget is spent.
        if session.turn_budget_spent() {
            let result = self.evaluate_current_topic(session).await;
            session.record_topic_result(result)?;

            if !session.has_remaining_topics() {
                return Ok((FAREWELL.to_string(), true));
            }
            let label = session.begin_next_topic()?.label.clone();
            let reply = self
                .generate_reply(session, ReplyInstruction::OpenTopic { label })
                .await?;
            return Ok((reply, false));
        }

        let label = current_label(session);
        let reply = self
            .generate_reply(session, ReplyInstruction::Probe { label })
            .await?;
        Ok((reply, false))
    }

    /// Scores the current topic from the transcript. Evaluation failures
    /// degrade to a gap result rather than losing the turn.
    async fn evaluate_current_topic(&self, session: &InterviewSession) -> TopicResult {
        let topic = match session.current_topic() {
            Some(topic) => topic.clone(),
            None => {
                return TopicResult {
                    topic_id: String::new(),
                    status: TopicStatus::GapDetected,
                    score: 0.0,
                }
            }
        };

        match self.evaluate_with_model(session, &topic.id, &topic.label).await {
            Ok(result) => result,
            Err(reason) => {
                tracing::warn!(
                    interview_id = %session.id(),
                    topic = %topic.id,
                    reason = %reason,
                    "topic evaluation fell back to gap result"
                );
                TopicResult {
                    topic_id: topic.id,
                    status: TopicStatus::GapDetected,
                    score: 0.0,
                }
            }
        }
    }

    async fn evaluate_with_model(
        &self,
        session: &InterviewSession,
        topic_id: &str,
        topic_label: &str,
    ) -> Result<TopicResult, String> {
        let system = format!(
            "You are evaluating how well a business owner covered the topic \"{}\" \
             during an interview held in Italian. Reply with a JSON object: \
             {{\"status\": \"PASSED\" | \"FAILED\" | \"GAP_DETECTED\", \"score\": 0.0-1.0}}. \
             PASSED means the topic was covered adequately, FAILED means it was not, \
             GAP_DETECTED means the answers revealed something worth a follow-up.",
            topic_label
        );
        let mut request = CompletionRequest::new(&self.generation_model)
            .with_message(ChatRole::System, system)
            .with_temperature(0.0)
            .with_max_tokens(100)
            .with_json_mode();
        for message in transcript_window(session, GENERATION_WINDOW) {
            request = request.with_message(message.0, message.1);
        }

        let response = self
            .gateway
            .complete(request)
            .await
            .map_err(|e| e.to_string())?;
        let wire: WireEvaluation =
            serde_json::from_str(response.content.trim()).map_err(|e| e.to_string())?;
        TopicResult::new(topic_id, wire.status, wire.score.clamp(0.0, 1.0))
            .map_err(|e| e.to_string())
    }

    async fn generate_reply(
        &self,
        session: &InterviewSession,
        instruction: ReplyInstruction,
    ) -> Result<String, LlmError> {
        let goal = match &instruction {
            ReplyInstruction::OpenTopic { label } => format!(
                "Introduce the topic \"{}\" and ask the first open question about it.",
                label
            ),
            ReplyInstruction::Probe { label } => format!(
                "Stay on the topic \"{}\": acknowledge the answer briefly and ask one \
                 follow-up question that digs deeper.",
                label
            ),
            ReplyInstruction::Resume => {
                "The user chose to continue; pick the conversation back up with one \
                 question on the current topic."
                    .to_string()
            }
        };
        let system = format!(
            "You are a friendly business consultant interviewing an Italian business \
             owner about their activity. Speak Italian, keep replies to a few sentences, \
             and ask exactly one question per turn. {}",
            goal
        );

        let mut request = CompletionRequest::new(&self.generation_model)
            .with_message(ChatRole::System, system)
            .with_temperature(0.7)
            .with_max_tokens(400);
        for message in transcript_window(session, GENERATION_WINDOW) {
            request = request.with_message(message.0, message.1);
        }

        let response = self.gateway.complete(request).await?;
        let content = response.content.trim();
        if content.is_empty() {
            return Err(LlmError::parse("empty completion content"));
        }
        Ok(content.to_string())
    }
}

#[derive(Debug, serde::Deserialize)]
struct WireEvaluation {
    status: TopicStatus,
    score: f32,
}

fn current_label(session: &InterviewSession) -> String {
    session
        .current_topic()
        .map(|t| t.label.clone())
        .unwrap_or_default()
}

fn last_assistant_line(session: &InterviewSession) -> Option<&str> {
    session
        .messages()
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::Assistant)
        .map(|m| m.content.as_str())
}

fn recent_lines(session: &InterviewSession, limit: usize) -> Vec<String> {
    let messages = session.messages();
    messages
        .iter()
        .filter(|m| m.role != MessageRole::System)
        .rev()
        .take(limit)
        .map(|m| m.content.clone())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// The trailing transcript as (role, content) pairs for the wire request.
fn transcript_window(session: &InterviewSession, limit: usize) -> Vec<(ChatRole, String)> {
    let messages: Vec<_> = session
        .messages()
        .iter()
        .filter(|m| m.role != MessageRole::System)
        .collect();
    let start = messages.len().saturating_sub(limit);
    messages[start..]
        .iter()
        .map(|m| {
            let role = match m.role {
                MessageRole::User => ChatRole::User,
                MessageRole::Assistant => ChatRole::Assistant,
                MessageRole::System => ChatRole::System,
            };
            (role, m.content.clone())
        })
        .collect()
}
