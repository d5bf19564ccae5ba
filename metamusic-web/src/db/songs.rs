//! Song queries

use chrono::NaiveDate;
use metamusic_common::db::Song;
use metamusic_common::new_id;
use serde::Serialize;
use sqlx::SqlitePool;

/// Writable song fields
#[derive(Debug, Clone, Default)]
pub struct SongInput {
    pub title: String,
    pub album_id: Option<String>,
    pub artist_id: String,
    pub duration: Option<String>,
    pub language: Option<String>,
    pub lyrics: Option<String>,
    pub cover_url: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub is_trending: bool,
}

/// Song row joined with artist name and album title
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SongDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub song: Song,
    pub artist_name: Option<String>,
    pub album_title: Option<String>,
}

const SELECT_DETAIL: &str = r#"
    SELECT s.*, ar.name AS artist_name, al.title AS album_title
    FROM songs s
    LEFT JOIN artists ar ON ar.id = s.artist_id
    LEFT JOIN albums al ON al.id = s.album_id
"#;

pub async fn get_song(db: &SqlitePool, id: &str) -> sqlx::Result<Option<SongDetail>> {
    sqlx::query_as::<_, SongDetail>(&format!("{} WHERE s.id = ?", SELECT_DETAIL))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn song_exists(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM songs WHERE id = ?)")
        .bind(id)
        .fetch_one(db)
        .await
}

/// Newest first
pub async fn list_songs(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<SongDetail>> {
    sqlx::query_as::<_, SongDetail>(&format!(
        "{} ORDER BY s.created_at DESC, s.rowid DESC LIMIT ?",
        SELECT_DETAIL
    ))
    .bind(limit)
    .fetch_all(db)
    .await
}

/// Album track list in insertion order
pub async fn songs_by_album(db: &SqlitePool, album_id: &str) -> sqlx::Result<Vec<Song>> {
    sqlx::query_as::<_, Song>(
        "SELECT * FROM songs WHERE album_id = ? ORDER BY created_at ASC, rowid ASC",
    )
    .bind(album_id)
    .fetch_all(db)
    .await
}

pub async fn insert_song(db: &SqlitePool, input: &SongInput) -> sqlx::Result<Song> {
    sqlx::query_as::<_, Song>(
        r#"
        INSERT INTO songs (id, title, album_id, artist_id, duration, language, lyrics, cover_url, release_date, is_trending)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(&input.title)
    .bind(&input.album_id)
    .bind(&input.artist_id)
    .bind(&input.duration)
    .bind(&input.language)
    .bind(&input.lyrics)
    .bind(&input.cover_url)
    .bind(input.release_date)
    .bind(input.is_trending)
    .fetch_one(db)
    .await
}

pub async fn update_song(
    db: &SqlitePool,
    id: &str,
    input: &SongInput,
) -> sqlx::Result<Option<Song>> {
    sqlx::query_as::<_, Song>(
        r#"
        UPDATE songs
        SET title = ?, album_id = ?, artist_id = ?, duration = ?, language = ?, lyrics = ?,
            cover_url = ?, release_date = ?, is_trending = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.album_id)
    .bind(&input.artist_id)
    .bind(&input.duration)
    .bind(&input.language)
    .bind(&input.lyrics)
    .bind(&input.cover_url)
    .bind(input.release_date)
    .bind(input.is_trending)
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_song(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
