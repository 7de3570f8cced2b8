//! Persona catalog endpoints.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use vantage_types::insight::Visuals;
use vantage_types::persona::{Persona, PersonaId};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Persona fields exposed to clients; the prompt fragment stays server-side.
#[derive(Debug, Serialize)]
pub struct PersonaView {
    pub id: PersonaId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub focus_areas: Vec<String>,
    pub numeric_focus: bool,
}

impl From<&Persona> for PersonaView {
    fn from(persona: &Persona) -> Self {
        Self {
            id: persona.id,
            name: persona.name.clone(),
            description: persona.description.clone(),
            icon: persona.icon.clone(),
            focus_areas: persona.focus_areas.clone(),
            numeric_focus: persona.numeric_focus,
        }
    }
}

/// Detail view adding the persona's default dashboard visuals.
#[derive(Debug, Serialize)]
pub struct PersonaDetailView {
    #[serde(flatten)]
    pub persona: PersonaView,
    pub visuals: Visuals,
}

/// List the five personas in display order.
pub async fn list_personas(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PersonaView>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let personas: Vec<PersonaView> = state.catalog.all().iter().map(PersonaView::from).collect();

    let elapsed = start.elapsed().as_millis() as u64;
    let response =
        ApiResponse::success(personas, request_id, elapsed).with_link("self", "/api/v1/personas");
    Ok(Json(response))
}

/// Fetch one persona together with its default visuals.
pub async fn get_persona(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PersonaDetailView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let persona = state.catalog.get(&id)?;
    let detail = PersonaDetailView {
        persona: PersonaView::from(persona),
        visuals: state.catalog.visuals(persona.id),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let response = ApiResponse::success(detail, request_id, elapsed)
        .with_link("self", format!("/api/v1/personas/{id}"));
    Ok(Json(response))
}
