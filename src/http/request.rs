//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) as early as possible
//! - Strip connection-management headers before forwarding
//! - Buffer the inbound body for non-GET/HEAD methods
//!
//! # Design Decisions
//! - Headers stay an ordered multimap end to end; hyper transmits repeated
//!   headers natively, so values are never joined into a single string
//! - Bodies are fully buffered before the upstream call is issued; the
//!   proxy never forwards a partial request body

use std::task::{Context, Poll};

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, Request};
use tower::{Layer, Service};
use uuid::Uuid;

use crate::error::ProxyError;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Headers invalid or misleading once the request is re-issued to a
/// different host/transport.
const STRIPPED_REQUEST_HEADERS: [&str; 4] =
    ["host", "connection", "content-length", "transfer-encoding"];

fn is_stripped_request_header(name: &HeaderName) -> bool {
    STRIPPED_REQUEST_HEADERS
        .iter()
        .any(|stripped| name.as_str() == *stripped)
}

/// Copy inbound headers into the outbound header set.
///
/// Connection-management headers are dropped (HeaderName is already
/// lowercase, so matching is case-insensitive by construction), as are
/// headers with empty values. Multi-valued headers are preserved.
pub fn sanitize_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound.iter() {
        if is_stripped_request_header(name) {
            continue;
        }
        if value.is_empty() {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }
    outbound
}

/// Buffer the full inbound body before the outbound call is made.
///
/// GET/HEAD requests forward no body. A failure mid-read (including the
/// size limit) aborts the proxy call; nothing has been sent upstream yet.
pub async fn buffer_body(method: &Method, body: Body, limit: usize) -> Result<Bytes, ProxyError> {
    if method == Method::GET || method == Method::HEAD {
        return Ok(Bytes::new());
    }
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| ProxyError::BodyRead(e.to_string()))
}

/// Tower layer that assigns an `x-request-id` to requests lacking one.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

#[derive(Clone, Debug)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        if !request.headers().contains_key(X_REQUEST_ID) {
            let id = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                request.headers_mut().insert(X_REQUEST_ID, value);
            }
        }
        self.inner.call(request)
    }
}
