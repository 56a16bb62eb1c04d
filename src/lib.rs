//! Stance API Forwarding Proxy Library

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod mock;
pub mod observability;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
