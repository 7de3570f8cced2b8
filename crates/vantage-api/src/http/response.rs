//! Standard response envelope for the REST API.
//!
//! Every endpoint returns the same JSON shape: a `data` payload on success,
//! an `errors` list on failure, and request metadata either way.

use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;

/// Response envelope wrapping every API payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Payload on success; absent when the request failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    pub meta: ApiMeta,

    /// Failure details; empty (and omitted) on success.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,

    /// Related resource links, keyed by relation name.
    #[serde(rename = "_links", skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, String>,
}

/// Request metadata attached to every response.
#[derive(Debug, Serialize)]
pub struct ApiMeta {
    pub request_id: String,
    /// RFC 3339 timestamp of when the response was produced.
    pub timestamp: String,
    pub response_time_ms: u64,
}

/// A single error entry in the envelope.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Stable machine-readable code, e.g. "PERSONA_NOT_FOUND".
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    /// Build a success envelope around `data`.
    pub fn success(data: T, request_id: String, response_time_ms: u64) -> Self {
        Self {
            data: Some(data),
            meta: ApiMeta {
                request_id,
                timestamp: Utc::now().to_rfc3339(),
                response_time_ms,
            },
            errors: Vec::new(),
            links: HashMap::new(),
        }
    }

    /// Build a failure envelope with a single error entry.
    pub fn error(
        code: impl Into<String>,
        message: impl Into<String>,
        request_id: String,
        response_time_ms: u64,
    ) -> Self {
        Self {
            data: None,
            meta: ApiMeta {
                request_id,
                timestamp: Utc::now().to_rfc3339(),
                response_time_ms,
            },
            errors: vec![ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            }],
            links: HashMap::new(),
        }
    }

    /// Attach a related-resource link.
    pub fn with_link(mut self, rel: impl Into<String>, href: impl Into<String>) -> Self {
        self.links.insert(rel.into(), href.into());
        self
    }
}
