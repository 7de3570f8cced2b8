//! OpenAI-compatible chat completions wire types.
//!
//! Request/response structures for the `/chat/completions` endpoint as
//! OpenRouter and other OpenAI-compatible services speak it. These are
//! HTTP-facing only -- the provider-agnostic types live in vantage-types.

use serde::{Deserialize, Serialize};

/// Request body for `POST {base_url}/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatRequestMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// A single `{role, content}` wire message. The system prompt travels as
/// the first message with role `system`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequestMessage {
    pub role: String,
    pub content: String,
}

/// Response body for a non-streaming chat completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One completion choice; the first carries the reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

/// The assistant message inside a choice. `content` can be null on some
/// services, so it is optional here.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}
