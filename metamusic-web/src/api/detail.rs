//! Entity detail pages: artist, album, song, playlist
//!
//! Each returns the record (404 when missing), the rails shown alongside
//! it and its platform links.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use metamusic_common::db::{Artist, EntityKind, PlatformLink, Playlist, Song};
use serde::Serialize;

use crate::db::albums::{self, AlbumWithArtist};
use crate::db::artists;
use crate::db::cards::{self, Card};
use crate::db::platform_links::links_for;
use crate::db::playlists::{self, PlaylistTrack};
use crate::db::songs::{self, SongDetail};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

const ARTIST_TOP_SONGS: i64 = 5;
const ARTIST_ALBUMS: i64 = 8;
const RELATED_ARTISTS: i64 = 6;

#[derive(Debug, Serialize)]
pub struct ArtistResponse {
    pub artist: Artist,
    pub songs: Vec<Card>,
    pub albums: Vec<Card>,
    pub other_artists: Vec<Card>,
    pub links: Vec<PlatformLink>,
}

/// GET /api/artists/:id
pub async fn artist_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ArtistResponse>> {
    let db = &state.db;
    let artist = artists::get_artist(db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Artist {}", id)))?;

    let (songs, albums, other_artists, links) = tokio::try_join!(
        cards::songs_by_artist(db, &id, ARTIST_TOP_SONGS),
        cards::albums_by_artist(db, &id, ARTIST_ALBUMS),
        cards::other_artists(db, &id, RELATED_ARTISTS),
        links_for(db, EntityKind::Artist, &id),
    )?;

    Ok(Json(ArtistResponse {
        artist,
        songs,
        albums,
        other_artists,
        links,
    }))
}

#[derive(Debug, Serialize)]
pub struct AlbumResponse {
    pub album: AlbumWithArtist,
    pub songs: Vec<Song>,
    pub links: Vec<PlatformLink>,
}

/// GET /api/albums/:id
pub async fn album_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AlbumResponse>> {
    let db = &state.db;
    let album = albums::get_album(db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Album {}", id)))?;

    let (songs, links) = tokio::try_join!(
        songs::songs_by_album(db, &id),
        links_for(db, EntityKind::Album, &id),
    )?;

    Ok(Json(AlbumResponse { album, songs, links }))
}

#[derive(Debug, Serialize)]
pub struct SongResponse {
    pub song: SongDetail,
    pub links: Vec<PlatformLink>,
}

/// GET /api/songs/:id
pub async fn song_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SongResponse>> {
    let song = songs::get_song(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Song {}", id)))?;
    let links = links_for(&state.db, EntityKind::Song, &id).await?;

    Ok(Json(SongResponse { song, links }))
}

#[derive(Debug, Serialize)]
pub struct PlaylistResponse {
    pub playlist: Playlist,
    pub songs: Vec<PlaylistTrack>,
    pub links: Vec<PlatformLink>,
}

/// GET /api/playlists/:id
pub async fn playlist_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PlaylistResponse>> {
    let db = &state.db;
    let playlist = playlists::get_playlist(db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Playlist {}", id)))?;

    let (songs, links) = tokio::try_join!(
        playlists::playlist_tracks(db, &id),
        links_for(db, EntityKind::Playlist, &id),
    )?;

    Ok(Json(PlaylistResponse {
        playlist,
        songs,
        links,
    }))
}

pub fn detail_routes() -> Router<AppState> {
    Router::new()
        .route("/api/artists/:id", get(artist_detail))
        .route("/api/albums/:id", get(album_detail))
        .route("/api/songs/:id", get(song_detail))
        .route("/api/playlists/:id", get(playlist_detail))
}
