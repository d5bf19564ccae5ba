//! Chart queries

use chrono::NaiveDate;
use metamusic_common::db::{ChartItem, EntityKind};
use metamusic_common::new_id;
use serde::Serialize;
use sqlx::SqlitePool;

/// Writable chart fields
#[derive(Debug, Clone)]
pub struct ChartInput {
    pub kind: EntityKind,
    pub reference_id: String,
    pub rank: i64,
    pub week: NaiveDate,
}

/// Chart entry with the referenced entity's display title
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ChartEntry {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub item: ChartItem,
    /// NULL when the referenced row no longer exists
    pub title: Option<String>,
}

/// Top entries by rank
pub async fn top_entries(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<ChartEntry>> {
    sqlx::query_as::<_, ChartEntry>(
        r#"
        SELECT c.*,
            CASE c.type
                WHEN 'song' THEN (SELECT title FROM songs WHERE id = c.reference_id)
                WHEN 'album' THEN (SELECT title FROM albums WHERE id = c.reference_id)
                WHEN 'artist' THEN (SELECT name FROM artists WHERE id = c.reference_id)
            END AS title
        FROM charts c
        ORDER BY c.rank ASC, c.week DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await
}

/// `reference_id` of the most recent number-one entry of a kind
pub async fn latest_number_one(db: &SqlitePool, kind: EntityKind) -> sqlx::Result<Option<String>> {
    sqlx::query_scalar(
        "SELECT reference_id FROM charts WHERE type = ? AND rank = 1 ORDER BY week DESC LIMIT 1",
    )
    .bind(kind)
    .fetch_optional(db)
    .await
}

/// Latest week first
pub async fn list_charts(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<ChartItem>> {
    sqlx::query_as::<_, ChartItem>(
        "SELECT * FROM charts ORDER BY week DESC, rank ASC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn insert_chart(db: &SqlitePool, input: &ChartInput) -> sqlx::Result<ChartItem> {
    sqlx::query_as::<_, ChartItem>(
        "INSERT INTO charts (id, type, reference_id, rank, week) VALUES (?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(input.kind)
    .bind(&input.reference_id)
    .bind(input.rank)
    .bind(input.week)
    .fetch_one(db)
    .await
}

pub async fn update_chart(
    db: &SqlitePool,
    id: &str,
    input: &ChartInput,
) -> sqlx::Result<Option<ChartItem>> {
    sqlx::query_as::<_, ChartItem>(
        r#"
        UPDATE charts SET type = ?, reference_id = ?, rank = ?, week = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(input.kind)
    .bind(&input.reference_id)
    .bind(input.rank)
    .bind(input.week)
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_chart(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM charts WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
