//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all + query-param routes)
//!     → request.rs (request ID, strip hop-by-hop headers, buffer body)
//!     → [mock table may short-circuit]
//!     → hyper client issues the upstream request
//!     → response.rs (mirror status/headers/body, CORS + diagnostic headers)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
