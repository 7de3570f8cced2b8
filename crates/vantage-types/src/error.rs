use thiserror::Error;

/// Errors related to persona lookup.
#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("unknown persona: '{0}'")]
    UnknownPersona(String),
}

/// Errors related to session lookup.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,
}

/// Errors raised while assembling startup configuration.
///
/// `MissingCredential` is the only fatal error in the workspace: without an
/// API key the process refuses to start, so no completion request is ever
/// attempted unauthenticated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing credential: no API key found (set {0})")]
    MissingCredential(String),

    #[error("invalid config file '{path}': {message}")]
    Invalid { path: String, message: String },

    #[error("config read error: {0}")]
    Io(String),
}
