//! Completion request/response types for Vantage.
//!
//! These types model the single synchronous, non-streaming call a
//! conversation turn makes to the hosted completion service, independent of
//! any concrete provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a completion conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single `{role, content}` message in a completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Request for a single completion.
///
/// `messages` is ordered: the prior history first, the new user message
/// last. The system prompt travels separately so providers can place it
/// wherever their wire format wants it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Response from a completion: the generated text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
}

/// Errors from the completion service boundary.
///
/// Neither kind is retried anywhere in the workspace; both surface directly
/// to the user as a visible message.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The service could not be reached, timed out, or answered with a
    /// transport-level failure (including malformed response bodies).
    #[error("completion service unavailable: {message}")]
    UpstreamUnavailable { message: String },

    /// The service signaled throttling.
    #[error("completion service rate limited (retry after {retry_after_ms:?}ms)")]
    UpstreamRateLimited { retry_after_ms: Option<u64> },
}
