//! OpenAI-compatible completion provider.
//!
//! One [`OpenAiCompatProvider`] serves any service speaking the OpenAI chat
//! completions protocol via a configurable base URL; OpenRouter is the
//! default. Each `complete` call makes exactly one HTTP request: failures
//! map to [`CompletionError`] and surface to the caller unretried.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use vantage_core::llm::CompletionProvider;
use vantage_types::config::AppConfig;
use vantage_types::llm::{CompletionError, CompletionRequest, CompletionResponse};

use self::types::{ChatRequest, ChatRequestMessage, ChatResponse};

/// Completion provider for OpenAI-compatible chat APIs.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the Authorization header. The struct deliberately does not
/// derive Debug so the key cannot leak through formatting.
pub struct OpenAiCompatProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    provider_name: String,
    model: String,
}

impl OpenAiCompatProvider {
    /// Sent as the `X-Title` header so hosted gateways can attribute traffic.
    const APP_TITLE: &'static str = "Vantage";

    /// Create a provider against an arbitrary OpenAI-compatible service.
    ///
    /// Model, base URL, and request timeout come from [`AppConfig`]. A
    /// trailing slash on the base URL is tolerated.
    pub fn new(name: impl Into<String>, api_key: SecretString, config: &AppConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            provider_name: name.into(),
            model: config.model.clone(),
        }
    }

    /// Create an OpenRouter provider.
    ///
    /// With a default [`AppConfig`] this targets
    /// `https://openrouter.ai/api/v1`.
    pub fn openrouter(api_key: SecretString, config: &AppConfig) -> Self {
        Self::new("openrouter", api_key, config)
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a generic [`CompletionRequest`] into the wire format.
    ///
    /// The system prompt becomes the first message with role `system`;
    /// conversation messages follow in order.
    fn to_wire_request(&self, request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref system) = request.system {
            messages.push(ChatRequestMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }

        for message in &request.messages {
            messages.push(ChatRequestMessage {
                role: message.role.to_string(),
                content: message.content.clone(),
            });
        }

        // Use the model from the request if set, otherwise the configured default
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        ChatRequest {
            model,
            messages,
            temperature: request.temperature,
            max_tokens: Some(request.max_tokens),
        }
    }
}

// OpenAiCompatProvider intentionally does NOT derive Debug to prevent
// accidental exposure of internal state including the API key.

impl CompletionProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let body = self.to_wire_request(request);
        let url = self.url("/chat/completions");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .header("X-Title", Self::APP_TITLE)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::UpstreamUnavailable {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let error_body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &headers, error_body));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            CompletionError::UpstreamUnavailable {
                message: format!("failed to parse response: {e}"),
            }
        })?;

        let first = chat_response.choices.first().ok_or_else(|| {
            CompletionError::UpstreamUnavailable {
                message: "response contained no choices".to_string(),
            }
        })?;
        let content = first.message.content.clone().unwrap_or_default();

        Ok(CompletionResponse {
            id: chat_response.id,
            content,
            model: chat_response.model,
        })
    }
}

/// Map a non-success response status to a [`CompletionError`].
///
/// 429 carries the parsed `Retry-After`; any other status surfaces as an
/// unavailable upstream with the status and body attached.
fn error_for_status(
    status: reqwest::StatusCode,
    headers: &reqwest::header::HeaderMap,
    body: String,
) -> CompletionError {
    match status.as_u16() {
        429 => CompletionError::UpstreamRateLimited {
            retry_after_ms: parse_retry_after(headers),
        },
        _ => CompletionError::UpstreamUnavailable {
            message: format!("HTTP {status}: {body}"),
        },
    }
}

/// Parse a `Retry-After` header (whole seconds) into milliseconds.
/// The HTTP-date form is treated as absent.
fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
    use vantage_types::llm::{Message, MessageRole};

    fn make_provider() -> OpenAiCompatProvider {
        OpenAiCompatProvider::openrouter(
            SecretString::from("test-key-not-real"),
            &AppConfig::default(),
        )
    }

    #[test]
    fn test_openrouter_factory_defaults() {
        let provider = make_provider();
        assert_eq!(provider.name(), "openrouter");
        assert_eq!(provider.model(), "mistralai/mixtral-8x7b-instruct");
        assert_eq!(
            provider.url("/chat/completions"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_base_url_override_trims_trailing_slash() {
        let provider = make_provider().with_base_url("http://localhost:8080/v1/".to_string());
        assert_eq!(
            provider.url("/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_to_wire_request_places_system_first() {
        let provider = make_provider();
        let request = CompletionRequest {
            model: "mistralai/mixtral-8x7b-instruct".to_string(),
            messages: vec![
                Message {
                    role: MessageRole::User,
                    content: "What's our ROI?".to_string(),
                },
                Message {
                    role: MessageRole::Assistant,
                    content: "ROI is 22%.".to_string(),
                },
            ],
            system: Some("You are a financial analyst.".to_string()),
            max_tokens: 1000,
            temperature: Some(0.3),
        };

        let wire = provider.to_wire_request(&request);
        assert_eq!(wire.messages.len(), 3);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[0].content, "You are a financial analyst.");
        assert_eq!(wire.messages[1].role, "user");
        assert_eq!(wire.messages[2].role, "assistant");
        assert_eq!(wire.temperature, Some(0.3));
        assert_eq!(wire.max_tokens, Some(1000));
    }

    #[test]
    fn test_to_wire_request_without_system() {
        let provider = make_provider();
        let request = CompletionRequest {
            model: "m".to_string(),
            messages: vec![Message {
                role: MessageRole::User,
                content: "hello".to_string(),
            }],
            system: None,
            max_tokens: 100,
            temperature: None,
        };

        let wire = provider.to_wire_request(&request);
        assert_eq!(wire.messages.len(), 1);
        assert_eq!(wire.messages[0].role, "user");
    }

    #[test]
    fn test_to_wire_request_empty_model_uses_default() {
        let provider = make_provider();
        let request = CompletionRequest {
            model: String::new(),
            messages: vec![],
            system: None,
            max_tokens: 100,
            temperature: None,
        };

        let wire = provider.to_wire_request(&request);
        assert_eq!(wire.model, "mistralai/mixtral-8x7b-instruct");
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("30"));
        assert_eq!(parse_retry_after(&headers), Some(30_000));
    }

    #[test]
    fn test_parse_retry_after_absent_or_unparseable() {
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
        );
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn test_parse_retry_after_huge_value_saturates() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("18446744073709552"));
        assert_eq!(parse_retry_after(&headers), Some(u64::MAX));
    }

    #[test]
    fn test_error_for_status_rate_limited_with_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("30"));
        let err = error_for_status(StatusCode::TOO_MANY_REQUESTS, &headers, String::new());
        assert!(matches!(
            err,
            CompletionError::UpstreamRateLimited {
                retry_after_ms: Some(30_000)
            }
        ));
    }

    #[test]
    fn test_error_for_status_rate_limited_without_header() {
        let err =
            error_for_status(StatusCode::TOO_MANY_REQUESTS, &HeaderMap::new(), String::new());
        assert!(matches!(
            err,
            CompletionError::UpstreamRateLimited {
                retry_after_ms: None
            }
        ));
    }

    #[test]
    fn test_error_for_status_other_statuses_map_to_unavailable() {
        let err = error_for_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            &HeaderMap::new(),
            "upstream exploded".to_string(),
        );
        match err {
            CompletionError::UpstreamUnavailable { message } => {
                assert!(message.contains("500"));
                assert!(message.contains("upstream exploded"));
            }
            other => panic!("expected UpstreamUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_timeout_comes_from_config() {
        let config = AppConfig {
            request_timeout_secs: 5,
            ..AppConfig::default()
        };
        // Construction must not panic with a custom timeout.
        let provider =
            OpenAiCompatProvider::new("custom", SecretString::from("test-key"), &config);
        assert_eq!(provider.name(), "custom");
    }
}
