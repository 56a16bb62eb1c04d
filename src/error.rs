//! Request-level error taxonomy.
//!
//! # Responsibilities
//! - Distinguish configuration errors (500) from forwarding errors (502)
//! - Render every failure as a JSON object with an `error` key
//! - Leave upstream application errors (4xx/5xx) untouched; those are
//!   mirrored, never converted
//!
//! # Design Decisions
//! - Missing origin is a per-request error, not a startup failure, so the
//!   proxy can boot in mock-only environments
//! - A single 502 shape covers both body-read and upstream-fetch failures

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors produced while handling a single proxied request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// No upstream origin configured; nothing to forward to.
    #[error("BACKEND_ORIGIN env not set")]
    MissingOrigin,

    /// Inbound request body could not be buffered to completion.
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// Network-level failure while talking to the upstream.
    #[error("upstream request failed: {0}")]
    Upstream(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingOrigin => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::BodyRead(_) | ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ProxyError::MissingOrigin => json!({ "error": "BACKEND_ORIGIN env not set" }),
            ProxyError::BodyRead(detail) | ProxyError::Upstream(detail) => {
                json!({ "error": "Proxy failed", "detail": detail })
            }
        };
        (status, Json(body)).into_response()
    }
}
