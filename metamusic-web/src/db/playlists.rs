//! Playlist and playlist membership queries

use chrono::NaiveDateTime;
use metamusic_common::db::{Playlist, Song};
use metamusic_common::new_id;
use serde::Serialize;
use sqlx::SqlitePool;

/// Writable playlist fields
///
/// `created_by_admin` is not writable: playlists created through the admin
/// section are always marked as admin-curated.
#[derive(Debug, Clone, Default)]
pub struct PlaylistInput {
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub is_featured: bool,
}

/// A song as it appears inside a playlist
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PlaylistTrack {
    pub position: i64,
    pub added_at: NaiveDateTime,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub song: Song,
    pub artist_name: Option<String>,
}

pub async fn get_playlist(db: &SqlitePool, id: &str) -> sqlx::Result<Option<Playlist>> {
    sqlx::query_as::<_, Playlist>("SELECT * FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Newest first
pub async fn list_playlists(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<Playlist>> {
    sqlx::query_as::<_, Playlist>(
        "SELECT * FROM playlists ORDER BY created_at DESC, rowid DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn insert_playlist(db: &SqlitePool, input: &PlaylistInput) -> sqlx::Result<Playlist> {
    sqlx::query_as::<_, Playlist>(
        r#"
        INSERT INTO playlists (id, title, description, cover_url, created_by_admin, is_featured)
        VALUES (?, ?, ?, ?, 1, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.cover_url)
    .bind(input.is_featured)
    .fetch_one(db)
    .await
}

pub async fn update_playlist(
    db: &SqlitePool,
    id: &str,
    input: &PlaylistInput,
) -> sqlx::Result<Option<Playlist>> {
    sqlx::query_as::<_, Playlist>(
        r#"
        UPDATE playlists
        SET title = ?, description = ?, cover_url = ?, is_featured = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.cover_url)
    .bind(input.is_featured)
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_playlist(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Playlist contents in position order
pub async fn playlist_tracks(db: &SqlitePool, playlist_id: &str) -> sqlx::Result<Vec<PlaylistTrack>> {
    sqlx::query_as::<_, PlaylistTrack>(
        r#"
        SELECT ps.position, ps.added_at, s.*, ar.name AS artist_name
        FROM playlist_songs ps
        JOIN songs s ON s.id = ps.song_id
        LEFT JOIN artists ar ON ar.id = s.artist_id
        WHERE ps.playlist_id = ?
        ORDER BY ps.position ASC
        "#,
    )
    .bind(playlist_id)
    .fetch_all(db)
    .await
}

/// Append a song at the end of the playlist
///
/// Returns the song's position. Adding a song that is already present
/// leaves the playlist unchanged and returns its existing position.
pub async fn add_song(db: &SqlitePool, playlist_id: &str, song_id: &str) -> sqlx::Result<i64> {
    // Single write statement: the position is computed under the write
    // lock, so concurrent adds never need a read-to-write upgrade
    sqlx::query(
        r#"
        INSERT INTO playlist_songs (playlist_id, song_id, position)
        SELECT ?1, ?2, COALESCE(MAX(position), 0) + 1
        FROM playlist_songs
        WHERE playlist_id = ?1
        ON CONFLICT (playlist_id, song_id) DO NOTHING
        "#,
    )
    .bind(playlist_id)
    .bind(song_id)
    .execute(db)
    .await?;

    sqlx::query_scalar("SELECT position FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .fetch_one(db)
        .await
}

pub async fn remove_song(db: &SqlitePool, playlist_id: &str, song_id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
