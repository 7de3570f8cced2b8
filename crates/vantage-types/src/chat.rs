//! Chat session and message types for Vantage.
//!
//! Sessions are in-memory only: created when a user arrives, destroyed when
//! the session ends or the process exits. Nothing is persisted. The message
//! sequence is strictly append-only; the operations in `vantage-core` only
//! ever push messages, and switching personas never touches prior ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::insight::DataTable;
use crate::persona::PersonaId;

// Re-export MessageRole from the llm module (used in both chat and wire contexts).
pub use crate::llm::MessageRole;

/// A single message within a session.
///
/// Ordered by `created_at` within a session. Assistant messages may carry a
/// numeric payload extracted from the reply text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<DataTable>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: MessageRole::User,
            content: content.into(),
            payload: None,
            created_at: Utc::now(),
        }
    }

    /// Build an assistant message, optionally carrying an extracted payload.
    pub fn assistant(content: impl Into<String>, payload: Option<DataTable>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: MessageRole::Assistant,
            content: content.into(),
            payload,
            created_at: Utc::now(),
        }
    }
}

/// One user's interaction: persona selection plus ordered message history.
///
/// The persona may change at any time; prior messages are never altered by
/// a switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub persona: PersonaId,
    pub messages: Vec<ChatMessage>,
    pub started_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Session {
    /// Create an empty session for a persona.
    pub fn new(persona: PersonaId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            persona,
            messages: Vec::new(),
            started_at: now,
            last_active_at: now,
        }
    }
}
