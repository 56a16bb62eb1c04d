//! Response handling and transformation.
//!
//! # Responsibilities
//! - Answer CORS preflights locally (they never reach the origin)
//! - Mirror upstream status/headers/body for the client
//! - Attach CORS and diagnostic headers to every proxied response
//!
//! # Design Decisions
//! - `content-encoding`, `content-length` and `transfer-encoding` are
//!   dropped from mirrored responses: the body is re-served from an
//!   in-memory buffer, so the original framing headers no longer hold
//! - `x-upstream-url` exposes the resolved backend URL for debugging
//!   misrouted requests; see DESIGN.md for the topology-leak flag

use axum::body::{Body, Bytes};
use axum::http::response::Parts;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Fixed proxy-identity header.
pub const X_PROXY: &str = "x-proxy";
pub const X_PROXY_FORWARD: &str = "stance-proxy";
pub const X_PROXY_MOCK: &str = "mock";

/// Diagnostic header carrying the resolved upstream URL.
pub const X_UPSTREAM_URL: &str = "x-upstream-url";

const ALLOW_METHODS: &str = "GET,POST,PUT,PATCH,DELETE,OPTIONS";

/// Body framing headers invalidated by full re-buffering.
const STRIPPED_RESPONSE_HEADERS: [&str; 3] =
    ["content-encoding", "content-length", "transfer-encoding"];

fn is_stripped_response_header(name: &HeaderName) -> bool {
    STRIPPED_RESPONSE_HEADERS
        .iter()
        .any(|stripped| name.as_str() == *stripped)
}

/// Answer a CORS preflight: 204, no body, permissive headers echoing the
/// request where present.
pub fn preflight(request_headers: &HeaderMap) -> Response {
    let allow_origin = request_headers
        .get(header::ORIGIN)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"));
    let allow_headers = request_headers
        .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"));

    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
    response
}

/// Build the client response from a fully buffered upstream response.
///
/// Status is copied verbatim; headers are copied minus the framing
/// exclusion set; the diagnostic upstream URL is attached.
pub fn mirror(upstream: Parts, body: Bytes, target_url: &str) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = upstream.status;

    for (name, value) in upstream.headers.iter() {
        if is_stripped_response_header(name) {
            continue;
        }
        response.headers_mut().append(name.clone(), value.clone());
    }

    response
        .headers_mut()
        .insert(X_PROXY, HeaderValue::from_static(X_PROXY_FORWARD));
    if let Ok(value) = HeaderValue::from_str(target_url) {
        response.headers_mut().insert(X_UPSTREAM_URL, value);
    }

    response
}

/// Attach the CORS headers every non-preflight response carries, plus the
/// proxy identity if no short-circuit already set one.
pub fn append_cors(headers: &mut HeaderMap, request_origin: Option<&HeaderValue>) {
    let allow_origin = request_origin
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    if !headers.contains_key(X_PROXY) {
        headers.insert(X_PROXY, HeaderValue::from_static(X_PROXY_FORWARD));
    }
}
