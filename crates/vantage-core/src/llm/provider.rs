//! CompletionProvider trait definition.
//!
//! The single seam between conversation logic and the hosted completion
//! service. One method, one synchronous request/response -- no streaming,
//! no partial updates, no retries.

use vantage_types::llm::{CompletionError, CompletionRequest, CompletionResponse};

/// Trait for completion service backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The
/// orchestrator is generic over this trait so tests can drive it with an
/// in-memory mock; the real implementation lives in vantage-infra.
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Model identifier this provider sends with each request.
    fn model(&self) -> &str;

    /// Send one completion request and await the full response.
    ///
    /// Exactly one outbound call per invocation. Errors surface to the
    /// caller as-is; nothing here retries.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, CompletionError>> + Send;
}
