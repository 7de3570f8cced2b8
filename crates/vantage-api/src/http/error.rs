//! HTTP error mapping from domain failures to status codes.
//!
//! Handlers bubble domain errors up with `?`; this module decides the status
//! code, stable error code, and envelope body for each. Upstream failures
//! keep their original detail so the dashboard can show what the model
//! provider actually reported.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use vantage_core::orchestrator::TurnError;
use vantage_types::error::{PersonaError, SessionError};
use vantage_types::llm::CompletionError;

use super::response::ApiResponse;

/// Application-level error for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    Persona(PersonaError),
    Session(SessionError),
    Completion(CompletionError),
    Validation(String),
}

impl From<PersonaError> for AppError {
    fn from(err: PersonaError) -> Self {
        AppError::Persona(err)
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl From<CompletionError> for AppError {
    fn from(err: CompletionError) -> Self {
        AppError::Completion(err)
    }
}

impl From<TurnError> for AppError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::EmptyMessage => AppError::Validation(err.to_string()),
            TurnError::Session(inner) => AppError::Session(inner),
            TurnError::Completion(inner) => AppError::Completion(inner),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let retry_after_ms = match &self {
            AppError::Completion(CompletionError::UpstreamRateLimited { retry_after_ms }) => {
                *retry_after_ms
            }
            _ => None,
        };

        let (status, code, message) = match &self {
            AppError::Persona(err) => (StatusCode::NOT_FOUND, "PERSONA_NOT_FOUND", err.to_string()),
            AppError::Session(err) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", err.to_string()),
            AppError::Completion(err) => match err {
                CompletionError::UpstreamRateLimited { .. } => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "UPSTREAM_RATE_LIMITED",
                    err.to_string(),
                ),
                CompletionError::UpstreamUnavailable { .. } => (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_UNAVAILABLE",
                    err.to_string(),
                ),
            },
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
            }
        };

        let mut body = ApiResponse::<()>::error(code, message, String::new(), 0);
        if let Some(ms) = retry_after_ms {
            if let Some(entry) = body.errors.first_mut() {
                entry.details = Some(serde_json::json!({ "retry_after_ms": ms }));
            }
        }

        let mut response = (status, Json(body)).into_response();
        if let Some(ms) = retry_after_ms {
            let secs = ms.div_ceil(1000);
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
