//! Request ID generation for [`SetRequestIdLayer`](tower_http::request_id::SetRequestIdLayer).
//!
//! An incoming `X-Request-Id` is kept as-is by the layer; only requests
//! without one reach [`MakeRequestUlid`].

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};

/// Mints a fresh ULID per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUlid;

impl MakeRequestId for MakeRequestUlid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = ulid::Ulid::new().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}
