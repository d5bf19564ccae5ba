//! Platform link queries

use metamusic_common::db::{EntityKind, PlatformLink, PlatformName};
use metamusic_common::new_id;
use sqlx::SqlitePool;

/// Writable platform link fields
#[derive(Debug, Clone)]
pub struct PlatformLinkInput {
    pub kind: EntityKind,
    pub reference_id: String,
    pub platform_name: PlatformName,
    pub url: String,
    pub icon_url: Option<String>,
}

/// Links attached to one entity
pub async fn links_for(
    db: &SqlitePool,
    kind: EntityKind,
    reference_id: &str,
) -> sqlx::Result<Vec<PlatformLink>> {
    sqlx::query_as::<_, PlatformLink>(
        "SELECT * FROM platform_links WHERE type = ? AND reference_id = ? ORDER BY platform_name",
    )
    .bind(kind)
    .bind(reference_id)
    .fetch_all(db)
    .await
}

/// Newest first
pub async fn list_links(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<PlatformLink>> {
    sqlx::query_as::<_, PlatformLink>(
        "SELECT * FROM platform_links ORDER BY created_at DESC, rowid DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn insert_link(db: &SqlitePool, input: &PlatformLinkInput) -> sqlx::Result<PlatformLink> {
    sqlx::query_as::<_, PlatformLink>(
        r#"
        INSERT INTO platform_links (id, type, reference_id, platform_name, url, icon_url)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(input.kind)
    .bind(&input.reference_id)
    .bind(input.platform_name)
    .bind(&input.url)
    .bind(&input.icon_url)
    .fetch_one(db)
    .await
}

pub async fn update_link(
    db: &SqlitePool,
    id: &str,
    input: &PlatformLinkInput,
) -> sqlx::Result<Option<PlatformLink>> {
    sqlx::query_as::<_, PlatformLink>(
        r#"
        UPDATE platform_links
        SET type = ?, reference_id = ?, platform_name = ?, url = ?, icon_url = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(input.kind)
    .bind(&input.reference_id)
    .bind(input.platform_name)
    .bind(&input.url)
    .bind(&input.icon_url)
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_link(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM platform_links WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
