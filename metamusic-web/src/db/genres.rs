//! Genre queries

use metamusic_common::db::Genre;
use metamusic_common::new_id;
use sqlx::SqlitePool;

/// Writable genre fields
#[derive(Debug, Clone, Default)]
pub struct GenreInput {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

pub async fn get_genre(db: &SqlitePool, id: &str) -> sqlx::Result<Option<Genre>> {
    sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Alphabetical, optionally capped
pub async fn list_genres(db: &SqlitePool, limit: Option<i64>) -> sqlx::Result<Vec<Genre>> {
    // LIMIT -1 is SQLite for "no limit"
    sqlx::query_as::<_, Genre>("SELECT * FROM genres ORDER BY name ASC LIMIT ?")
        .bind(limit.unwrap_or(-1))
        .fetch_all(db)
        .await
}

pub async fn other_genres(db: &SqlitePool, exclude_id: &str, limit: i64) -> sqlx::Result<Vec<Genre>> {
    sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id != ? LIMIT ?")
        .bind(exclude_id)
        .bind(limit)
        .fetch_all(db)
        .await
}

pub async fn insert_genre(db: &SqlitePool, input: &GenreInput) -> sqlx::Result<Genre> {
    sqlx::query_as::<_, Genre>(
        "INSERT INTO genres (id, name, description, image_url) VALUES (?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(&input.name)
    .bind(&input.description)
    .bind(&input.image_url)
    .fetch_one(db)
    .await
}

pub async fn update_genre(
    db: &SqlitePool,
    id: &str,
    input: &GenreInput,
) -> sqlx::Result<Option<Genre>> {
    sqlx::query_as::<_, Genre>(
        "UPDATE genres SET name = ?, description = ?, image_url = ? WHERE id = ? RETURNING *",
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(&input.image_url)
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_genre(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM genres WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
