//! Admin section
//!
//! Every route here sits behind [`require_admin`](super::auth::require_admin).
//! CRUD handlers are generic over [`AdminResource`]; each entity supplies
//! its form mapping and data-access calls in [`resources`].

use axum::{
    async_trait,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Form, Json, Router,
};
use metamusic_common::db::{load_setting_i64, User, SETTING_ADMIN_LIST_LIMIT};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use tracing::info;

use crate::db::{count_rows, playlists, songs, COUNTED_TABLES};
use crate::error::{ApiError, ApiResult};
use crate::forms::FormFields;
use crate::AppState;

pub mod resources;

use resources::{Albums, Artists, Charts, Genres, PlatformLinks, Playlists, Songs};

const DEFAULT_LIST_LIMIT: i64 = 50;

/// One administrable entity table
#[async_trait]
pub trait AdminResource: Send + Sync + 'static {
    /// Path segment under `/api/admin/`
    const PATH: &'static str;
    /// Singular name used in messages and logs
    const LABEL: &'static str;

    /// Row shape of the list view
    type Listed: Serialize + Send + 'static;
    /// Row returned from create and update
    type Row: Serialize + Send + 'static;
    type Input: Send + Sync + 'static;

    fn parse(form: &FormFields) -> ApiResult<Self::Input>;

    async fn list(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<Self::Listed>>;
    async fn create(db: &SqlitePool, input: &Self::Input) -> sqlx::Result<Self::Row>;
    async fn update(db: &SqlitePool, id: &str, input: &Self::Input) -> sqlx::Result<Option<Self::Row>>;
    async fn delete(db: &SqlitePool, id: &str) -> sqlx::Result<bool>;
}

async fn list_rows<R: AdminResource>(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<R::Listed>>> {
    let limit = load_setting_i64(&state.db, SETTING_ADMIN_LIST_LIMIT, DEFAULT_LIST_LIMIT).await?;
    Ok(Json(R::list(&state.db, limit).await?))
}

async fn create_row<R: AdminResource>(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
    Form(form): Form<FormFields>,
) -> ApiResult<(StatusCode, Json<R::Row>)> {
    let input = R::parse(&form)?;
    let row = R::create(&state.db, &input).await?;
    info!("{} created {}", admin.email, R::LABEL);
    Ok((StatusCode::CREATED, Json(row)))
}

async fn update_row<R: AdminResource>(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
    Path(id): Path<String>,
    Form(form): Form<FormFields>,
) -> ApiResult<Json<R::Row>> {
    let input = R::parse(&form)?;
    let row = R::update(&state.db, &id, &input)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} {}", R::LABEL, id)))?;
    info!("{} updated {} {}", admin.email, R::LABEL, id);
    Ok(Json(row))
}

async fn delete_row<R: AdminResource>(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !R::delete(&state.db, &id).await? {
        return Err(ApiError::NotFound(format!("{} {}", R::LABEL, id)));
    }
    info!("{} deleted {} {}", admin.email, R::LABEL, id);
    Ok(StatusCode::NO_CONTENT)
}

/// List/create at `/api/admin/{path}`, update/delete at `/api/admin/{path}/:id`
fn resource_routes<R: AdminResource>() -> Router<AppState> {
    Router::new()
        .route(
            &format!("/api/admin/{}", R::PATH),
            get(list_rows::<R>).post(create_row::<R>),
        )
        .route(
            &format!("/api/admin/{}/:id", R::PATH),
            put(update_row::<R>).delete(delete_row::<R>),
        )
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub admin: String,
    pub counts: BTreeMap<&'static str, i64>,
}

/// GET /api/admin
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
) -> ApiResult<Json<DashboardResponse>> {
    let mut counts = BTreeMap::new();
    for table in COUNTED_TABLES {
        counts.insert(table, count_rows(&state.db, table).await?);
    }
    Ok(Json(DashboardResponse {
        admin: admin.email,
        counts,
    }))
}

#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub playlist_id: String,
    pub song_id: String,
    pub position: i64,
}

/// POST /api/admin/playlists/:id/songs
pub async fn add_playlist_song(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
    Form(form): Form<FormFields>,
) -> ApiResult<(StatusCode, Json<MembershipResponse>)> {
    let song_id = form.text("song_id");
    if song_id.is_empty() {
        return Err(ApiError::BadRequest("song_id is required".to_string()));
    }
    if playlists::get_playlist(&state.db, &playlist_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("Playlist {}", playlist_id)));
    }
    if !songs::song_exists(&state.db, &song_id).await? {
        return Err(ApiError::NotFound(format!("Song {}", song_id)));
    }

    let position = playlists::add_song(&state.db, &playlist_id, &song_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MembershipResponse {
            playlist_id,
            song_id,
            position,
        }),
    ))
}

/// DELETE /api/admin/playlists/:id/songs/:song_id
pub async fn remove_playlist_song(
    State(state): State<AppState>,
    Path((playlist_id, song_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    if playlists::remove_song(&state.db, &playlist_id, &song_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!(
            "Song {} in playlist {}",
            song_id, playlist_id
        )))
    }
}

/// All admin routes; the caller applies the admin gate
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin", get(dashboard))
        .merge(resource_routes::<Artists>())
        .merge(resource_routes::<Albums>())
        .merge(resource_routes::<Songs>())
        .merge(resource_routes::<Playlists>())
        .merge(resource_routes::<Genres>())
        .merge(resource_routes::<PlatformLinks>())
        .merge(resource_routes::<Charts>())
        .route("/api/admin/playlists/:id/songs", post(add_playlist_song))
        .route(
            "/api/admin/playlists/:id/songs/:song_id",
            delete(remove_playlist_song),
        )
}
