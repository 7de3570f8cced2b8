//! Conversation turn orchestration.
//!
//! `ConversationOrchestrator` runs one user turn end to end: snapshot the
//! session, assemble the persona system prompt plus full history, make
//! exactly one completion call, extract any structured payload, and append
//! the completed turn. An upstream failure surfaces to the caller as-is and
//! leaves the session history exactly as it was.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use vantage_types::chat::ChatMessage;
use vantage_types::config::AppConfig;
use vantage_types::error::SessionError;
use vantage_types::insight::Visuals;
use vantage_types::llm::{CompletionError, CompletionRequest};

use crate::catalog::PersonaCatalog;
use crate::extract::parse_data_table;
use crate::llm::CompletionProvider;
use crate::prompt::{SystemPromptBuilder, conversation_messages};
use crate::session::SessionStore;

/// Substrings that mark a message as asking for analysis (case-insensitive).
const ANALYSIS_KEYWORDS: [&str; 4] = ["analyze", "research", "data", "metrics"];

/// Outcome of a successful conversation turn.
#[derive(Debug, Clone)]
pub struct TurnReply {
    /// The user message as appended to the session.
    pub user: ChatMessage,
    /// The assistant reply, carrying any extracted table payload.
    pub assistant: ChatMessage,
    /// The active persona's default visuals, suggested when the message
    /// asked for analysis.
    pub suggested: Option<Visuals>,
}

/// Errors from running a conversation turn.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The user message was empty or whitespace. Nothing was sent upstream.
    #[error("message is empty")]
    EmptyMessage,

    /// The session does not exist.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// The completion service failed. The session was not modified.
    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),
}

/// Drives conversation turns against a completion provider.
///
/// Holds the provider, the persona catalog, and the session store; turn
/// sampling settings come from [`AppConfig`] at construction. Each
/// [`respond`](Self::respond) call makes exactly one upstream request --
/// nothing here retries.
pub struct ConversationOrchestrator<P: CompletionProvider> {
    provider: P,
    catalog: Arc<PersonaCatalog>,
    sessions: SessionStore,
    temperature: f64,
    max_tokens: u32,
}

impl<P: CompletionProvider> ConversationOrchestrator<P> {
    pub fn new(
        provider: P,
        catalog: Arc<PersonaCatalog>,
        sessions: SessionStore,
        config: &AppConfig,
    ) -> Self {
        Self {
            provider,
            catalog,
            sessions,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Run one conversation turn.
    ///
    /// Steps:
    /// 1. Reject empty messages before anything goes upstream
    /// 2. Snapshot the session and resolve its active persona
    /// 3. Build the request: persona system prompt, full history in order,
    ///    new message last
    /// 4. Make the single completion call
    /// 5. On success, extract a table payload (numeric-focus personas only)
    ///    and append the user message plus reply to the session
    ///
    /// On failure nothing is appended: the history holds completed turns
    /// only.
    pub async fn respond(&self, session_id: &Uuid, text: &str) -> Result<TurnReply, TurnError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TurnError::EmptyMessage);
        }

        let session = self.sessions.get(session_id)?;
        let persona = self.catalog.by_id(session.persona);

        let request = CompletionRequest {
            model: self.provider.model().to_string(),
            messages: conversation_messages(&session.messages, trimmed),
            system: Some(SystemPromptBuilder::build(persona)),
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
        };

        info!(
            session_id = %session_id,
            persona = %persona.id,
            history_len = session.messages.len(),
            "running conversation turn"
        );

        let response = match self.provider.complete(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "completion call failed");
                return Err(err.into());
            }
        };

        let payload = if persona.numeric_focus {
            parse_data_table(&response.content)
        } else {
            None
        };

        let user = ChatMessage::user(trimmed);
        let assistant = ChatMessage::assistant(response.content, payload);
        self.sessions
            .append_turn(session_id, user.clone(), assistant.clone())?;

        let suggested = wants_analysis(trimmed).then(|| self.catalog.visuals(persona.id));

        Ok(TurnReply {
            user,
            assistant,
            suggested,
        })
    }
}

/// True when the message asks for analysis, by keyword.
fn wants_analysis(text: &str) -> bool {
    let lowered = text.to_lowercase();
    ANALYSIS_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}
