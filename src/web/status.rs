//! Health handler.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use tracing::{debug, trace};

use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: DatabaseStatus,
    pub version: &'static str,
}

/// Liveness plus a database ping. Always 200; the ping result is reported in the body.
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    trace!("health check requested");
    let database = match state.db.ping().await {
        Ok(()) => DatabaseStatus::Connected,
        Err(e) => {
            debug!(error = %e, "database ping failed");
            DatabaseStatus::Disconnected
        }
    };

    Json(HealthResponse {
        status: "healthy",
        database,
        version: env!("CARGO_PKG_VERSION"),
    })
}
