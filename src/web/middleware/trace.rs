//! Per-request tracing spans and severity-proportional response logging
//! for [`TraceLayer`](tower_http::trace::TraceLayer).

use axum::http::{Request, Response, StatusCode};
use std::time::Duration;
use tower_http::request_id::RequestId;
use tower_http::trace::{MakeSpan, OnResponse};
use tracing::{Level, Span};

/// Opens a `request` span tagged with the resolved request ID.
///
/// Must sit inside `SetRequestIdLayer` so the [`RequestId`] extension is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let req_id = request
            .extensions()
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            req_id = %req_id,
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

/// One event per response: debug below 400, info for client errors, warn for server errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogResponse;

impl<B> OnResponse<B> for LogResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status().as_u16();
        let duration_ms = latency.as_millis() as u64;

        let level = response_level(response.status());
        if level == Level::DEBUG {
            tracing::debug!(status, duration_ms, "Response");
        } else if level == Level::INFO {
            tracing::info!(status, duration_ms, "Response");
        } else {
            tracing::warn!(status, duration_ms, "Response");
        }
    }
}

fn response_level(status: StatusCode) -> Level {
    match status.as_u16() {
        0..=399 => Level::DEBUG,
        400..=499 => Level::INFO,
        _ => Level::WARN,
    }
}
