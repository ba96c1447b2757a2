// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the context pipeline, the backend registry, and
//! the collaborator traits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies one conversation: a user, optionally talking to a persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationScope {
    pub user_id: i64,
    #[serde(default)]
    pub persona_id: Option<i64>,
}

impl ConversationScope {
    /// Scope for a plain chatbot conversation.
    pub fn user(user_id: i64) -> Self {
        Self {
            user_id,
            persona_id: None,
        }
    }

    /// Scope for a conversation with one of the user's personas.
    pub fn persona(user_id: i64, persona_id: i64) -> Self {
        Self {
            user_id,
            persona_id: Some(persona_id),
        }
    }
}

/// One user turn plus its response turn.
///
/// `answer` is `None` while the response is still in flight. Exchanges are
/// immutable once persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// Record id assigned by the history store; `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Exchange {
    /// A finished exchange.
    pub fn complete(
        question: impl Into<String>,
        answer: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            question: question.into(),
            answer: Some(answer.into()),
            created_at,
        }
    }

    /// An exchange whose answer has not been produced yet.
    pub fn in_flight(question: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            question: question.into(),
            answer: None,
            created_at,
        }
    }

    /// Returns true once the answer is present.
    pub fn is_complete(&self) -> bool {
        self.answer.is_some()
    }
}

/// Origin of a transcript entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message in a transcript or model request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
}

impl TranscriptEntry {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Where a model backend runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BackendFamily {
    /// A remote inference API reached over the network.
    HostedApi,
    /// A locally running inference process.
    Local,
}

/// A named, invokable text-completion capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelBackend {
    pub identifier: String,
    pub family: BackendFamily,
    pub supports_streaming: bool,
}

impl ModelBackend {
    pub fn new(identifier: impl Into<String>, family: BackendFamily, supports_streaming: bool) -> Self {
        Self {
            identifier: identifier.into(),
            family,
            supports_streaming,
        }
    }
}

/// A fully assembled, model-ready request.
///
/// `messages[0]` is always the system instruction and the last entry is
/// always the new question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRequest {
    pub model: String,
    pub messages: Vec<TranscriptEntry>,
    pub stream: bool,
}

impl ModelRequest {
    /// The system instruction entry.
    pub fn instruction(&self) -> Option<&TranscriptEntry> {
        self.messages.first()
    }

    /// The new user question.
    pub fn question(&self) -> Option<&TranscriptEntry> {
        self.messages.last()
    }

    /// Prior-turn entries between the instruction and the question.
    pub fn history(&self) -> &[TranscriptEntry] {
        if self.messages.len() < 2 {
            return &[];
        }
        &self.messages[1..self.messages.len() - 1]
    }
}

/// The single result shape returned by a model provider adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Response text.
    pub content: String,
    /// Identifier of the backend that produced it.
    pub model: String,
}

/// A character the user chats with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub tone: String,
    #[serde(default)]
    pub summary: String,
}

/// Who wrote a stored persona message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

/// A sender-tagged stored message, one row per turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaMessage {
    pub sender: Sender,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
