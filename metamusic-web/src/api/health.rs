//! Health check endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

use super::buildinfo::get_build_info;
use crate::AppState;

/// Health check response: status, module name and version
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health
///
/// Does not require a session.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "metamusic-web".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health and build identity routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/buildinfo", get(get_build_info))
}
