//! Session lifecycle endpoints.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use vantage_types::chat::{ChatMessage, Session};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub persona: String,
}

#[derive(Debug, Deserialize)]
pub struct SwitchPersonaRequest {
    pub persona: String,
}

/// Parse a session id path segment, rejecting anything that is not a UUID.
pub(super) fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("invalid session id: {raw}")))
}

/// Open a new session for a persona, seeded with its welcome message.
pub async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<ApiResponse<Session>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let persona = state.catalog.get(&body.persona)?;
    let session = state.sessions.create(persona);
    tracing::info!(session_id = %session.id, persona = %persona.id, "session created");

    let elapsed = start.elapsed().as_millis() as u64;
    let link = format!("/api/v1/sessions/{}", session.id);
    let response = ApiResponse::success(session, request_id, elapsed).with_link("self", link);
    Ok(Json(response))
}

/// Fetch a session snapshot including its full transcript.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Session>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = parse_session_id(&id)?;
    let session = state.sessions.get(&session_id)?;

    let elapsed = start.elapsed().as_millis() as u64;
    let response = ApiResponse::success(session, request_id, elapsed)
        .with_link("self", format!("/api/v1/sessions/{id}"))
        .with_link("messages", format!("/api/v1/sessions/{id}/messages"));
    Ok(Json(response))
}

/// List a session's messages in append order.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = parse_session_id(&id)?;
    let session = state.sessions.get(&session_id)?;

    let elapsed = start.elapsed().as_millis() as u64;
    let response = ApiResponse::success(session.messages, request_id, elapsed)
        .with_link("session", format!("/api/v1/sessions/{id}"));
    Ok(Json(response))
}

/// Switch the session's active persona; prior messages are untouched.
pub async fn switch_persona(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SwitchPersonaRequest>,
) -> Result<Json<ApiResponse<Session>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = parse_session_id(&id)?;
    let persona = state.catalog.get(&body.persona)?;
    let session = state.sessions.switch_persona(&session_id, persona)?;
    tracing::info!(session_id = %session_id, persona = %persona.id, "session persona switched");

    let elapsed = start.elapsed().as_millis() as u64;
    let response = ApiResponse::success(session, request_id, elapsed)
        .with_link("self", format!("/api/v1/sessions/{id}"));
    Ok(Json(response))
}

/// Remove a session and return its final snapshot.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Session>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = parse_session_id(&id)?;
    let session = state.sessions.remove(&session_id)?;
    tracing::info!(session_id = %session_id, "session removed");

    let elapsed = start.elapsed().as_millis() as u64;
    let response = ApiResponse::success(session, request_id, elapsed);
    Ok(Json(response))
}
