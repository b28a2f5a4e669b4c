//! Bot aggregate: a configured chat or interview agent owned by a project.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BotId, ProjectId, Timestamp, ValidationError};

/// What kind of agent a bot is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotKind {
    /// Customer-facing chatbot.
    Chatbot,
    /// AI-led interview agent.
    Interview,
}

/// A configured agent owned by a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bot {
    id: BotId,
    project_id: ProjectId,
    name: String,
    kind: BotKind,
    kb_enabled: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Bot {
    /// Creates a new bot.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is empty.
    pub fn new(
        id: BotId,
        project_id: ProjectId,
        name: impl Into<String>,
        kind: BotKind,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let now = Timestamp::now();
        Ok(Self {
            id,
            project_id,
            name,
            kind,
            kb_enabled: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrates a bot from persisted state.
    pub fn restore(
        id: BotId,
        project_id: ProjectId,
        name: String,
        kind: BotKind,
        kb_enabled: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            project_id,
            name,
            kind,
            kb_enabled,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> BotId {
        self.id
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BotKind {
        self.kind
    }

    pub fn kb_enabled(&self) -> bool {
        self.kb_enabled
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Renames the bot.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        self.name = name;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Enables or disables knowledge-base growth for this bot.
    pub fn set_kb_enabled(&mut self, enabled: bool) {
        self.kb_enabled = enabled;
        self.updated_at = Timestamp::now();
    }
}
