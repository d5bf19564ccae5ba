//! metamusic-web library
//!
//! Music metadata browsing and administration over HTTP. Public routes
//! serve display data and search; `/api/admin/*` routes require an admin
//! session.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod forms;
pub mod pagination;

pub use error::{ApiError, ApiResult};

/// Settings fixed at startup
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Public base URL used for sitemap entries (no trailing slash)
    pub base_url: String,
}

impl WebConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<WebConfig>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: WebConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Build application router
///
/// Admin routes sit behind the admin session check; everything else is
/// public (handlers that need a signed-in user extract one themselves).
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;

    let admin = api::admin::admin_routes().layer(middleware::from_fn_with_state(
        state.clone(),
        api::auth::require_admin,
    ));

    let public = Router::new()
        .merge(api::health_routes())
        .merge(api::ui::ui_routes())
        .merge(api::auth::auth_routes())
        .merge(api::search::search_routes())
        .merge(api::browse::browse_routes())
        .merge(api::detail::detail_routes())
        .merge(api::profile::profile_routes());

    Router::new()
        .merge(admin)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
