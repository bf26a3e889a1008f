use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub uptime_secs: u64,
    pub environment: &'static str,
    pub service: &'static str,
}

/// GET /health -- unauthenticated, used by deploy pipelines.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started_at.elapsed().as_secs(),
        environment: state.config.environment.as_str(),
        service: "wpadmin",
    })
}

/// Mount health check routes (root-level, outside the gatekeeper).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
