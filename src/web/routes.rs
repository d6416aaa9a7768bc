//! Router construction and the top-level handlers.

use axum::{
    Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use std::time::Duration;
use tower::util::option_layer;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::trace;

use crate::config::Config;
use crate::db::Row;
use crate::state::AppState;
use crate::web::error::{ApiError, db_error};
use crate::web::middleware::request_id::MakeRequestUlid;
use crate::web::middleware::trace::{LogResponse, RequestSpan};
use crate::web::status;

/// Body served on `GET /`.
pub const GREETING: &str = "Backend funcionando 🚀";

/// Query executed by `GET /db`.
pub const CONNECTIVITY_QUERY: &str = "SELECT NOW()";

/// Middleware knobs for [`create_router`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub request_timeout: Duration,
    pub cors_permissive: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_permissive: true,
        }
    }
}

impl From<&Config> for RouterOptions {
    fn from(config: &Config) -> Self {
        Self {
            request_timeout: config.request_timeout,
            cors_permissive: config.cors_permissive,
        }
    }
}

/// Creates the web server router
pub fn create_router(app_state: AppState, options: &RouterOptions) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .route("/db", get(db_now))
        .route("/api/health", get(status::health))
        .with_state(app_state);

    router.layer((
        // Outermost: resolve the request ID before the span that records it is opened.
        SetRequestIdLayer::x_request_id(MakeRequestUlid),
        TraceLayer::new_for_http()
            .make_span_with(RequestSpan)
            .on_request(())
            .on_response(LogResponse)
            .on_failure(()),
        PropagateRequestIdLayer::x_request_id(),
        option_layer(options.cors_permissive.then(CorsLayer::permissive)),
        TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, options.request_timeout),
    ))
}

/// `GET /`
async fn root() -> Response {
    trace!("greeting requested");
    let mut resp = GREETING.into_response();
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    resp
}

/// `GET /db`
///
/// Returns the rows of `SELECT NOW()` as-is, or a 500 carrying the driver's error message.
async fn db_now(State(state): State<AppState>) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = state
        .db
        .query(CONNECTIVITY_QUERY)
        .await
        .map_err(|e| db_error("Connectivity query", e))?;
    Ok(Json(rows))
}
