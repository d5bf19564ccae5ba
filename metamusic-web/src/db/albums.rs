//! Album queries

use chrono::NaiveDate;
use metamusic_common::db::Album;
use metamusic_common::new_id;
use serde::Serialize;
use sqlx::SqlitePool;

/// Writable album fields
#[derive(Debug, Clone, Default)]
pub struct AlbumInput {
    pub title: String,
    pub artist_id: String,
    pub cover_url: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub is_trending: bool,
}

/// Album row joined with its artist's name
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AlbumWithArtist {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub album: Album,
    pub artist_name: Option<String>,
}

const SELECT_WITH_ARTIST: &str = r#"
    SELECT al.*, ar.name AS artist_name
    FROM albums al
    LEFT JOIN artists ar ON ar.id = al.artist_id
"#;

pub async fn get_album(db: &SqlitePool, id: &str) -> sqlx::Result<Option<AlbumWithArtist>> {
    sqlx::query_as::<_, AlbumWithArtist>(&format!("{} WHERE al.id = ?", SELECT_WITH_ARTIST))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Newest first
pub async fn list_albums(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<AlbumWithArtist>> {
    sqlx::query_as::<_, AlbumWithArtist>(&format!(
        "{} ORDER BY al.created_at DESC, al.rowid DESC LIMIT ?",
        SELECT_WITH_ARTIST
    ))
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn insert_album(db: &SqlitePool, input: &AlbumInput) -> sqlx::Result<Album> {
    sqlx::query_as::<_, Album>(
        r#"
        INSERT INTO albums (id, title, artist_id, cover_url, genre, release_date, description, is_trending)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(&input.title)
    .bind(&input.artist_id)
    .bind(&input.cover_url)
    .bind(&input.genre)
    .bind(input.release_date)
    .bind(&input.description)
    .bind(input.is_trending)
    .fetch_one(db)
    .await
}

pub async fn update_album(
    db: &SqlitePool,
    id: &str,
    input: &AlbumInput,
) -> sqlx::Result<Option<Album>> {
    sqlx::query_as::<_, Album>(
        r#"
        UPDATE albums
        SET title = ?, artist_id = ?, cover_url = ?, genre = ?, release_date = ?, description = ?, is_trending = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.artist_id)
    .bind(&input.cover_url)
    .bind(&input.genre)
    .bind(input.release_date)
    .bind(&input.description)
    .bind(input.is_trending)
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Songs on the album keep existing with `album_id` cleared
pub async fn delete_album(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
