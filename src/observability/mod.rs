//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing`; the request ID from the HTTP
//!   layer appears in every per-request event
//! - `RUST_LOG` wins over the configured level when set, so operators can
//!   turn on debug output without touching config

pub mod logging;
