//! Target resolution subsystem.
//!
//! # Data Flow
//! ```text
//! inbound URI
//!     → http layer extracts a relative path (catch-all segment or ?path= param)
//!     → target.rs (normalize path, compose origin + prefix + path + query)
//!     → TargetUrl string handed to the forwarder
//! ```
//!
//! # Design Decisions
//! - The raw query string passes through byte-for-byte; re-parsing and
//!   re-serializing query parameters is a lossy transformation
//! - Origin/prefix slash handling is idempotent, so sloppy configuration
//!   ("http://host/", "/api/") still composes a clean URL

pub mod target;

pub use target::{build_target_url, query_param};
