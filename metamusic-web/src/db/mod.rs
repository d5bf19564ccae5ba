//! Database access layer
//!
//! One module per entity. Functions take the pool and return `sqlx::Result`;
//! handlers convert to `ApiError` with `?`.

use sqlx::SqlitePool;

pub mod albums;
pub mod artists;
pub mod cards;
pub mod charts;
pub mod genres;
pub mod platform_links;
pub mod playlists;
pub mod saved;
pub mod search;
pub mod songs;
pub mod users;

/// Tables shown on the admin dashboard
pub const COUNTED_TABLES: [&str; 7] = [
    "artists",
    "albums",
    "songs",
    "playlists",
    "genres",
    "platform_links",
    "charts",
];

/// Exact row count for one of [`COUNTED_TABLES`]
pub async fn count_rows(db: &SqlitePool, table: &'static str) -> sqlx::Result<i64> {
    debug_assert!(COUNTED_TABLES.contains(&table));
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(db)
        .await
}

/// Build a case-insensitive "contains" pattern for the `REGEXP` operator
///
/// The input is escaped so it matches literally. Case folding is Unicode
/// aware, unlike SQLite's built-in `LIKE`.
pub fn contains_pattern(input: &str) -> String {
    format!("(?i){}", regex::escape(input))
}
