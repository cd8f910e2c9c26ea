//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Database reachability.
    pub database: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check handler. Pings the database so a wedged pool shows up
/// here before it shows up as failed ledger calls.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_up = state.db.ping().await.is_ok();

    Json(HealthResponse {
        status: if database_up { "healthy" } else { "degraded" },
        database: if database_up { "up" } else { "down" },
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
