//! Per-user saved items

use metamusic_common::db::{EntityKind, UserSaved};
use metamusic_common::new_id;
use serde::Serialize;
use sqlx::SqlitePool;

/// Saved item with the referenced entity's display title and page link
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SavedEntry {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub saved: UserSaved,
    pub title: Option<String>,
}

impl SavedEntry {
    pub fn href(&self) -> String {
        self.saved.kind.href(&self.saved.reference_id)
    }
}

pub async fn list_saved(db: &SqlitePool, user_id: &str) -> sqlx::Result<Vec<SavedEntry>> {
    sqlx::query_as::<_, SavedEntry>(
        r#"
        SELECT us.*,
            CASE us.type
                WHEN 'song' THEN (SELECT title FROM songs WHERE id = us.reference_id)
                WHEN 'album' THEN (SELECT title FROM albums WHERE id = us.reference_id)
                WHEN 'artist' THEN (SELECT name FROM artists WHERE id = us.reference_id)
                WHEN 'playlist' THEN (SELECT title FROM playlists WHERE id = us.reference_id)
            END AS title
        FROM user_saved us
        WHERE us.user_id = ?
        ORDER BY us.created_at DESC, us.rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Save an item; saving the same item twice returns the existing row
pub async fn save_item(
    db: &SqlitePool,
    user_id: &str,
    kind: EntityKind,
    reference_id: &str,
) -> sqlx::Result<UserSaved> {
    sqlx::query(
        r#"
        INSERT INTO user_saved (id, user_id, type, reference_id)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (user_id, type, reference_id) DO NOTHING
        "#,
    )
    .bind(new_id())
    .bind(user_id)
    .bind(kind)
    .bind(reference_id)
    .execute(db)
    .await?;

    sqlx::query_as::<_, UserSaved>(
        "SELECT * FROM user_saved WHERE user_id = ? AND type = ? AND reference_id = ?",
    )
    .bind(user_id)
    .bind(kind)
    .bind(reference_id)
    .fetch_one(db)
    .await
}

/// Remove one of the user's own saved items
pub async fn delete_saved(db: &SqlitePool, user_id: &str, id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM user_saved WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
