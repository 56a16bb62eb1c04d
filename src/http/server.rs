//! HTTP server setup and forwarding.
//!
//! # Responsibilities
//! - Create Axum Router with the two path-resolution adapters
//! - Wire up middleware (tracing, request ID)
//! - Answer CORS preflights before any other logic
//! - Forward requests to the configured origin and mirror responses
//!
//! # Design Decisions
//! - One forwarding function serves both resolution modes; the catch-all
//!   route and the `?path=` query route are thin adapters over it
//! - The upstream client never follows redirects; 3xx responses pass
//!   through verbatim so the original client sees them
//! - No retry and no proxy-imposed timeout: one attempt per request, the
//!   client owns retries

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Method, Request};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use http_body_util::BodyExt;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::schema::{LimitsConfig, ProxyConfig};
use crate::error::ProxyError;
use crate::http::request::{buffer_body, sanitize_headers, RequestIdLayer, X_REQUEST_ID};
use crate::http::response;
use crate::mock;
use crate::routing::target;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub client: Client<HttpsConnector<HttpConnector>, Body>,
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the native TLS root store cannot be loaded.
    pub fn new(config: ProxyConfig) -> Result<Self, std::io::Error> {
        let https = HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_all_versions()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(https);

        let state = AppState {
            config: Arc::new(config),
            client,
        };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(proxy_query_mode))
            .route("/{*path}", any(proxy_catch_all))
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Adapter for the catch-all route: the forwarded path comes from the
/// wildcard segment.
async fn proxy_catch_all(
    State(state): State<AppState>,
    Path(path): Path<String>,
    request: Request<Body>,
) -> Response {
    handle(state, path, request).await
}

/// Adapter for the query-parameter mode: the forwarded path comes from
/// `?path=…` on the mount point itself.
async fn proxy_query_mode(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = target::query_param(request.uri().query(), "path").unwrap_or_default();
    handle(state, path, request).await
}

/// Common entry point behind both adapters.
///
/// CORS preflights short-circuit first; everything else gets the CORS and
/// identity headers appended on the way out, errors included.
async fn handle(state: AppState, path: String, request: Request<Body>) -> Response {
    if request.method() == Method::OPTIONS {
        return response::preflight(request.headers());
    }

    let request_origin = request.headers().get(header::ORIGIN).cloned();
    let mut resp = match dispatch(&state, &path, request).await {
        Ok(resp) => resp,
        Err(err) => {
            tracing::error!(error = %err, path = %path, "proxy request failed");
            err.into_response()
        }
    };
    response::append_cors(resp.headers_mut(), request_origin.as_ref());
    resp
}

/// Mock short-circuit or forward-and-mirror.
async fn dispatch(
    state: &AppState,
    path: &str,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let raw_query = request.uri().query().map(str::to_owned);

    if mock::requested(&state.config.mock, request.headers(), raw_query.as_deref()) {
        tracing::debug!(method = %request.method(), path = %path, "serving mock response");
        return Ok(mock::respond(request.method(), path));
    }

    let target_url = target::build_target_url(
        state.config.upstream.origin.as_deref(),
        &state.config.upstream.prefix,
        path,
        raw_query.as_deref(),
    )?;

    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        target = %target_url,
        "forwarding request"
    );

    let (parts, body) = request.into_parts();
    let body_bytes = buffer_body(&parts.method, body, state.config.limits.max_body_size).await?;
    let outbound_headers = sanitize_headers(&parts.headers);

    let mut outbound = hyper::Request::builder()
        .method(parts.method)
        .uri(target_url.as_str())
        .body(Body::from(body_bytes))
        .map_err(|e| ProxyError::Upstream(e.to_string()))?;
    *outbound.headers_mut() = outbound_headers;

    match state.client.request(outbound).await {
        Ok(upstream) => {
            let (upstream_parts, upstream_body) = upstream.into_parts();
            let bytes = upstream_body
                .collect()
                .await
                .map_err(|e| upstream_error(&state.config.limits, e))?
                .to_bytes();
            tracing::debug!(
                request_id = %request_id,
                status = %upstream_parts.status,
                bytes = bytes.len(),
                "mirroring upstream response"
            );
            Ok(response::mirror(upstream_parts, bytes, &target_url))
        }
        Err(e) => Err(upstream_error(&state.config.limits, e)),
    }
}

fn upstream_error(limits: &LimitsConfig, err: impl std::fmt::Display) -> ProxyError {
    if limits.redact_upstream_errors {
        ProxyError::Upstream("upstream error".to_string())
    } else {
        ProxyError::Upstream(err.to_string())
    }
}
