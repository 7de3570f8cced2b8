//! Conversation turn endpoint.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vantage_types::chat::ChatMessage;
use vantage_types::insight::Visuals;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

use super::session::parse_session_id;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// Both sides of a completed conversation turn.
#[derive(Debug, Serialize)]
pub struct TurnView {
    pub user: ChatMessage,
    pub assistant: ChatMessage,
    /// Dashboard visuals suggested for this turn, when the message asked
    /// for analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested: Option<Visuals>,
}

/// Run one conversation turn: forward the message upstream, append both
/// sides to the session, and return them.
///
/// Upstream failures surface as errors and leave the session untouched.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<TurnView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = parse_session_id(&id)?;
    let reply = state.orchestrator.respond(&session_id, &body.message).await?;

    let turn = TurnView {
        user: reply.user,
        assistant: reply.assistant,
        suggested: reply.suggested,
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let response = ApiResponse::success(turn, request_id, elapsed)
        .with_link("session", format!("/api/v1/sessions/{id}"))
        .with_link("messages", format!("/api/v1/sessions/{id}/messages"));
    Ok(Json(response))
}
