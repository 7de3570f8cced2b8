//! Shared application state for CLI commands and HTTP handlers.

use std::sync::Arc;

use vantage_core::catalog::PersonaCatalog;
use vantage_core::orchestrator::ConversationOrchestrator;
use vantage_core::session::SessionStore;
use vantage_infra::config::load_config;
use vantage_infra::llm::OpenAiCompatProvider;
use vantage_infra::secret::resolve_api_key;
use vantage_types::config::AppConfig;

/// Orchestrator wired to the OpenAI-compatible HTTP provider.
pub type ChatOrchestrator = ConversationOrchestrator<OpenAiCompatProvider>;

/// Application state shared by every command and request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<PersonaCatalog>,
    pub sessions: SessionStore,
    pub orchestrator: Arc<ChatOrchestrator>,
}

impl AppState {
    /// Load configuration, resolve the upstream API key, and wire the
    /// conversation stack.
    ///
    /// A missing API key fails here, at startup, not on the first turn.
    pub async fn init() -> anyhow::Result<Self> {
        let config = load_config().await?;
        let api_key = resolve_api_key()?;

        let catalog = Arc::new(PersonaCatalog::new());
        let sessions = SessionStore::new();
        let provider = OpenAiCompatProvider::openrouter(api_key, &config);
        let orchestrator = Arc::new(ConversationOrchestrator::new(
            provider,
            Arc::clone(&catalog),
            sessions.clone(),
            &config,
        ));

        tracing::debug!(model = %config.model, "application state initialized");

        Ok(Self {
            config,
            catalog,
            sessions,
            orchestrator,
        })
    }
}
