//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarding proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream origin and path prefix.
    pub upstream: UpstreamConfig,

    /// Mock short-circuit mode.
    pub mock: MockConfig,

    /// Request buffering limits and error hardening.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the backend API host (e.g., "https://api.stance.app").
    ///
    /// Absence is a per-request 500, not a startup failure, so the proxy
    /// can still serve CORS preflights and mock responses without it.
    pub origin: Option<String>,

    /// Path prefix inserted between origin and forwarded path.
    /// Empty string disables the prefix entirely.
    pub prefix: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: None,
            prefix: "/api".to_string(),
        }
    }
}

/// Mock short-circuit configuration.
///
/// Process-wide switch; per-request activation via `?mock=1` or the
/// `x-mock: 1` header is always honored regardless of this setting.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MockConfig {
    /// Serve canned fixtures instead of contacting the upstream.
    pub enabled: bool,
}

/// Buffering limits and error hardening.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes (bodies are fully buffered).
    ///
    /// Requests over the cap fail with a 502 before anything reaches the
    /// upstream. Deployments fronting upload endpoints should raise this.
    pub max_body_size: usize,

    /// Replace the raw upstream error text in 502 bodies with a generic
    /// message instead of leaking internal error detail to clients.
    pub redact_upstream_errors: bool,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // 10MB
            redact_upstream_errors: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
