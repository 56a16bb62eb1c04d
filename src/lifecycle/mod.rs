//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging → Bind listener → Serve
//!
//! Shutdown:
//!     SIGTERM/SIGINT (signals.rs) → Shutdown::trigger (shutdown.rs)
//!     → axum graceful shutdown drains in-flight requests → Exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
