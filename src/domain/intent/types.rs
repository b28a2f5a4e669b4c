//! Classification value objects.

use serde::{Deserialize, Serialize};

/// Detected intent of a user reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// The user agrees with the proposal in context.
    Accept,
    /// The user declines the proposal in context.
    Refuse,
    /// No clear signal; the conversation proceeds unchanged.
    #[default]
    Neutral,
}

/// The question the reply is classified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentContext {
    /// Data-collection consent ("posso farti qualche domanda?").
    Consent,
    /// Interview-extension offer ("vuoi continuare ancora un po'?").
    Extension,
    /// Stop confirmation ("confermi di voler concludere?").
    StopConfirmation,
}

impl IntentContext {
    /// Short description used in classification prompts.
    pub fn prompt_question(&self) -> &'static str {
        match self {
            IntentContext::Consent => {
                "The assistant asked the user for consent to collect their answers."
            }
            IntentContext::Extension => {
                "The assistant offered to extend the interview with more questions."
            }
            IntentContext::StopConfirmation => {
                "The assistant asked the user to confirm they want to stop the interview now."
            }
        }
    }
}

/// Confidence attached to an extraction or classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
    #[default]
    None,
}

/// A structured field extractable from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    Role,
}

impl FieldKind {
    /// Field name used in prompts and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::FirstName => "first_name",
            FieldKind::LastName => "last_name",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Company => "company",
            FieldKind::Role => "role",
        }
    }

    /// Per-field extraction rules injected into the prompt.
    pub fn extraction_rules(&self) -> &'static str {
        match self {
            FieldKind::FirstName => {
                "Accept a bare first name. Never infer the name from an email address \
                 or a company name. If several names appear, take the one the user \
                 presents as their own."
            }
            FieldKind::LastName => {
                "Extract only the family name. Never infer it from an email address. \
                 Return nothing if only a first name is given."
            }
            FieldKind::Email => {
                "Extract a syntactically plausible email address exactly as written. \
                 Do not correct typos or complete partial addresses."
            }
            FieldKind::Phone => {
                "Extract a phone number, keeping the international prefix if present. \
                 Strip separators and spaces. Return nothing for number-like strings \
                 that are clearly not phone numbers."
            }
            FieldKind::Company => {
                "Extract the company or business name the user works for or owns. \
                 Do not extract competitor or customer names mentioned in passing."
            }
            FieldKind::Role => {
                "Extract the user's own role or job title, normalized to a short \
                 phrase. Do not infer seniority that is not stated."
            }
        }
    }
}

/// Result of extracting a single field from a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedField {
    /// Extracted value, if any.
    pub value: Option<String>,
    /// How confident the extraction is.
    pub confidence: Confidence,
}

impl ExtractedField {
    /// Creates an extraction result.
    pub fn new(value: Option<String>, confidence: Confidence) -> Self {
        Self { value, confidence }
    }

    /// The documented failure default: no value, no confidence.
    pub fn none() -> Self {
        Self {
            value: None,
            confidence: Confidence::None,
        }
    }
}

/// Verdict on whether a message explicitly asks to end the interview now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureSignal {
    /// True only for an explicit request to conclude.
    pub wants_to_conclude: bool,
    /// Confidence of the verdict.
    pub confidence: Confidence,
    /// Free-text reasoning from the classifier.
    pub reasoning: String,
}

impl ClosureSignal {
    /// Creates a closure verdict.
    pub fn new(wants_to_conclude: bool, confidence: Confidence, reasoning: impl Into<String>) -> Self {
        Self {
            wants_to_conclude,
            confidence,
            reasoning: reasoning.into(),
        }
    }

    /// The documented failure default: does not want to conclude, low confidence.
    pub fn negative_default(reasoning: impl Into<String>) -> Self {
        Self::new(false, Confidence::Low, reasoning)
    }
}
