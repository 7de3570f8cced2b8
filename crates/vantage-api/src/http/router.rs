//! Axum router wiring API routes, middleware, and the dashboard SPA.

use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::handlers;

/// Environment variable pointing at the built dashboard assets.
const WEB_DIR_ENV: &str = "VANTAGE_WEB_DIR";

/// Build the complete application router.
///
/// API routes live under `/api/v1`. When a built dashboard bundle exists on
/// disk, anything else falls through to it so client-side routing keeps
/// working on reload; without one, only the API is served.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/personas", get(handlers::persona::list_personas))
        .route("/personas/{id}", get(handlers::persona::get_persona))
        .route("/sessions", post(handlers::session::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route(
            "/sessions/{id}/messages",
            get(handlers::session::list_messages).post(handlers::chat::send_message),
        )
        .route("/sessions/{id}/persona", put(handlers::session::switch_persona));

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the built dashboard with index.html as the SPA fallback, but
    // only when the bundle is actually on disk.
    let web_dir = std::env::var(WEB_DIR_ENV).unwrap_or_else(|_| "web/dist".to_string());
    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{web_dir}/index.html");
        let spa = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(spa);
        tracing::info!(path = %web_dir, "dashboard static file serving enabled");
    }

    router.layer(CompressionLayer::new())
}

/// Liveness probe; reports the running version.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
