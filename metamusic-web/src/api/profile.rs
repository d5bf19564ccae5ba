//! Profile page and saved items

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Form, Json, Router,
};
use metamusic_common::db::{EntityKind, UserSaved};
use serde::Serialize;
use tracing::debug;

use super::auth::{CurrentUser, MaybeUser};
use crate::db::saved::{self, SavedEntry};
use crate::error::{ApiError, ApiResult};
use crate::forms::FormFields;
use crate::AppState;

/// Display name shown when nobody is signed in
pub const GUEST_NAME: &str = "Guest Listener";

#[derive(Debug, Serialize)]
pub struct SavedItem {
    #[serde(flatten)]
    pub entry: SavedEntry,
    pub href: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub display_name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub saved: Vec<SavedItem>,
}

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> ApiResult<Json<ProfileResponse>> {
    let Some(user) = user else {
        return Ok(Json(ProfileResponse {
            display_name: GUEST_NAME.to_string(),
            email: None,
            role: None,
            saved: Vec::new(),
        }));
    };

    let saved = saved::list_saved(&state.db, &user.id)
        .await?
        .into_iter()
        .map(|entry| SavedItem {
            href: entry.href(),
            entry,
        })
        .collect();

    Ok(Json(ProfileResponse {
        display_name: user.email.clone(),
        email: Some(user.email),
        role: Some(user.role),
        saved,
    }))
}

/// POST /api/profile/saved
pub async fn save(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<FormFields>,
) -> ApiResult<(StatusCode, Json<UserSaved>)> {
    let kind: EntityKind = form.parsed("type")?;
    let reference_id = form.text("reference_id");
    if reference_id.is_empty() {
        return Err(ApiError::BadRequest("reference_id is required".to_string()));
    }

    let item = saved::save_item(&state.db, &user.id, kind, &reference_id).await?;
    debug!("{} saved {} {}", user.email, kind, reference_id);
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/profile/saved/:id
pub async fn unsave(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if saved::delete_saved(&state.db, &user.id, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Saved item {}", id)))
    }
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/api/profile", get(get_profile))
        .route("/api/profile/saved", post(save))
        .route("/api/profile/saved/:id", delete(unsave))
}
