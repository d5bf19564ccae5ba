//! Artist queries

use metamusic_common::db::{Artist, Socials};
use metamusic_common::new_id;
use sqlx::types::Json;
use sqlx::SqlitePool;

/// Writable artist fields
#[derive(Debug, Clone, Default)]
pub struct ArtistInput {
    pub name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub country: Option<String>,
    pub debut_year: Option<i64>,
    pub is_trending: bool,
    pub socials: Option<Socials>,
}

pub async fn get_artist(db: &SqlitePool, id: &str) -> sqlx::Result<Option<Artist>> {
    sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Newest first
pub async fn list_artists(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<Artist>> {
    sqlx::query_as::<_, Artist>(
        "SELECT * FROM artists ORDER BY created_at DESC, rowid DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn insert_artist(db: &SqlitePool, input: &ArtistInput) -> sqlx::Result<Artist> {
    sqlx::query_as::<_, Artist>(
        r#"
        INSERT INTO artists (id, name, bio, image_url, country, debut_year, is_trending, socials)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(&input.name)
    .bind(&input.bio)
    .bind(&input.image_url)
    .bind(&input.country)
    .bind(input.debut_year)
    .bind(input.is_trending)
    .bind(input.socials.clone().map(Json))
    .fetch_one(db)
    .await
}

pub async fn update_artist(
    db: &SqlitePool,
    id: &str,
    input: &ArtistInput,
) -> sqlx::Result<Option<Artist>> {
    sqlx::query_as::<_, Artist>(
        r#"
        UPDATE artists
        SET name = ?, bio = ?, image_url = ?, country = ?, debut_year = ?, is_trending = ?, socials = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&input.name)
    .bind(&input.bio)
    .bind(&input.image_url)
    .bind(&input.country)
    .bind(input.debut_year)
    .bind(input.is_trending)
    .bind(input.socials.clone().map(Json))
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Deletes cascade to the artist's albums and songs
pub async fn delete_artist(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
