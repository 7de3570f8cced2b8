//! Application configuration for Vantage.
//!
//! `AppConfig` represents the optional `config.toml`. Every field has a
//! default, so the file may be absent entirely and the binary still runs
//! against OpenRouter with the stock model. The API key is deliberately not
//! part of this struct -- credentials come from the environment and live in
//! a `SecretString` (see `vantage-infra`).

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `~/.config/vantage/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model identifier sent with every completion request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible completion endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature. Low by default: personas answer with figures,
    /// not flourishes.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens generated per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Ceiling on a single completion call, in seconds. Expiry surfaces one
    /// failure; nothing is retried.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Bind host for `vantage serve`.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port for `vantage serve`.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_model() -> String {
    "mistralai/mixtral-8x7b-instruct".to_string()
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_temperature() -> f64 {
    0.3
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            host: default_host(),
            port: default_port(),
        }
    }
}
