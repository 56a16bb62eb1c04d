//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: BACKEND_ORIGIN, BACKEND_PREFIX, MOCK_PROXY)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to all handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow running with nothing but env vars
//! - A missing upstream origin is deliberately NOT a validation error:
//!   it surfaces as a per-request 500, keeping that path unit-testable
//!   without mutating the process environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ProxyConfig;
pub use schema::LimitsConfig;
pub use schema::ListenerConfig;
pub use schema::MockConfig;
pub use schema::UpstreamConfig;
