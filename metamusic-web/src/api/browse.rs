//! Public listing pages: home, charts, genres

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use metamusic_common::db::{EntityKind, Genre};
use serde::Serialize;

use crate::db::cards::{self, Card};
use crate::db::charts::{self, ChartEntry};
use crate::db::genres;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Cards per home page rail
const RAIL_SIZE: i64 = 12;
const CHART_SIZE: i64 = 10;
const RELATED_GENRES: i64 = 8;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub trending_songs: Vec<Card>,
    pub trending_albums: Vec<Card>,
    pub trending_artists: Vec<Card>,
    pub featured_playlists: Vec<Card>,
    pub top_song: Option<Card>,
    pub top_album: Option<Card>,
    pub top_artist: Option<Card>,
}

/// Card for the latest number-one entry of a kind
async fn number_one(state: &AppState, kind: EntityKind) -> sqlx::Result<Option<Card>> {
    match charts::latest_number_one(&state.db, kind).await? {
        Some(reference_id) => cards::card_for(&state.db, kind, &reference_id).await,
        None => Ok(None),
    }
}

/// GET /api/home
pub async fn home(State(state): State<AppState>) -> ApiResult<Json<HomeResponse>> {
    let db = &state.db;
    let (
        trending_songs,
        trending_albums,
        trending_artists,
        featured_playlists,
        top_song,
        top_album,
        top_artist,
    ) = tokio::try_join!(
        cards::trending_songs(db, RAIL_SIZE),
        cards::trending_albums(db, RAIL_SIZE),
        cards::trending_artists(db, RAIL_SIZE),
        cards::featured_playlists(db, RAIL_SIZE),
        number_one(&state, EntityKind::Song),
        number_one(&state, EntityKind::Album),
        number_one(&state, EntityKind::Artist),
    )?;

    Ok(Json(HomeResponse {
        trending_songs,
        trending_albums,
        trending_artists,
        featured_playlists,
        top_song,
        top_album,
        top_artist,
    }))
}

/// GET /api/charts
pub async fn top_charts(State(state): State<AppState>) -> ApiResult<Json<Vec<ChartEntry>>> {
    Ok(Json(charts::top_entries(&state.db, CHART_SIZE).await?))
}

/// GET /api/genres
pub async fn list_genres(State(state): State<AppState>) -> ApiResult<Json<Vec<Genre>>> {
    Ok(Json(genres::list_genres(&state.db, None).await?))
}

#[derive(Debug, Serialize)]
pub struct GenreResponse {
    pub genre: Genre,
    /// Trending songs across the catalog
    pub trending_songs: Vec<Card>,
    pub other_genres: Vec<Genre>,
}

/// GET /api/genres/:id
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<GenreResponse>> {
    let genre = genres::get_genre(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Genre {}", id)))?;

    let (trending_songs, other_genres) = tokio::try_join!(
        cards::trending_songs(&state.db, RAIL_SIZE),
        genres::other_genres(&state.db, &genre.id, RELATED_GENRES),
    )?;

    Ok(Json(GenreResponse {
        genre,
        trending_songs,
        other_genres,
    }))
}

pub fn browse_routes() -> Router<AppState> {
    Router::new()
        .route("/api/home", get(home))
        .route("/api/charts", get(top_charts))
        .route("/api/genres", get(list_genres))
        .route("/api/genres/:id", get(genre_detail))
}
