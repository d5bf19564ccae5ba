//! Tests for database initialization and default settings

use metamusic_common::db::init::{
    ensure_setting, init_database, load_setting_i64, save_setting, SETTING_ADMIN_LIST_LIMIT,
    SETTING_SEARCH_ALL_LIMIT, SETTING_SEARCH_PAGE_SIZE, SETTING_SESSION_TIMEOUT,
};
use sqlx::SqlitePool;

async fn fresh_pool() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("test.db")).await.unwrap();
    (dir, pool)
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("metamusic.db");

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("metamusic.db");

    let pool1 = init_database(&db_path).await.unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_all_tables_created() {
    let (_dir, pool) = fresh_pool().await;

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(&pool)
            .await
            .unwrap();

    for expected in [
        "albums",
        "artists",
        "charts",
        "genres",
        "platform_links",
        "playlist_songs",
        "playlists",
        "sessions",
        "settings",
        "songs",
        "user_saved",
        "users",
    ] {
        assert!(tables.iter().any(|t| t == expected), "missing table {}", expected);
    }
}

#[tokio::test]
async fn test_default_settings_initialized() {
    let (_dir, pool) = fresh_pool().await;

    assert_eq!(load_setting_i64(&pool, SETTING_SESSION_TIMEOUT, 1).await.unwrap(), 604800);
    assert_eq!(load_setting_i64(&pool, SETTING_SEARCH_PAGE_SIZE, 1).await.unwrap(), 12);
    assert_eq!(load_setting_i64(&pool, SETTING_ADMIN_LIST_LIMIT, 1).await.unwrap(), 50);
    assert_eq!(load_setting_i64(&pool, SETTING_SEARCH_ALL_LIMIT, 1).await.unwrap(), 24);
}

#[tokio::test]
async fn test_existing_setting_not_overwritten() {
    let (_dir, pool) = fresh_pool().await;

    save_setting(&pool, SETTING_SEARCH_PAGE_SIZE, "30").await.unwrap();
    ensure_setting(&pool, SETTING_SEARCH_PAGE_SIZE, "12").await.unwrap();

    assert_eq!(load_setting_i64(&pool, SETTING_SEARCH_PAGE_SIZE, 1).await.unwrap(), 30);
}

#[tokio::test]
async fn test_null_setting_reset_to_default() {
    let (_dir, pool) = fresh_pool().await;

    sqlx::query("UPDATE settings SET value = NULL WHERE key = ?")
        .bind(SETTING_ADMIN_LIST_LIMIT)
        .execute(&pool)
        .await
        .unwrap();
    ensure_setting(&pool, SETTING_ADMIN_LIST_LIMIT, "50").await.unwrap();

    assert_eq!(load_setting_i64(&pool, SETTING_ADMIN_LIST_LIMIT, 1).await.unwrap(), 50);
}

#[tokio::test]
async fn test_malformed_setting_falls_back() {
    let (_dir, pool) = fresh_pool().await;

    save_setting(&pool, SETTING_SEARCH_PAGE_SIZE, "lots").await.unwrap();
    assert_eq!(load_setting_i64(&pool, SETTING_SEARCH_PAGE_SIZE, 12).await.unwrap(), 12);

    save_setting(&pool, SETTING_SEARCH_PAGE_SIZE, "0").await.unwrap();
    assert_eq!(load_setting_i64(&pool, SETTING_SEARCH_PAGE_SIZE, 12).await.unwrap(), 12);

    assert_eq!(load_setting_i64(&pool, "no_such_key", 7).await.unwrap(), 7);
}

#[tokio::test]
async fn test_artist_delete_cascades_to_albums_and_songs() {
    let (_dir, pool) = fresh_pool().await;

    sqlx::query("INSERT INTO artists (id, name) VALUES ('ar1', 'Artist')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO albums (id, title, artist_id) VALUES ('al1', 'Album', 'ar1')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO songs (id, title, artist_id, album_id) VALUES ('s1', 'Song', 'ar1', 'al1')")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("DELETE FROM artists WHERE id = 'ar1'")
        .execute(&pool)
        .await
        .unwrap();

    let albums: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM albums")
        .fetch_one(&pool)
        .await
        .unwrap();
    let songs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!((albums, songs), (0, 0));
}

#[tokio::test]
async fn test_album_delete_detaches_songs() {
    let (_dir, pool) = fresh_pool().await;

    sqlx::query("INSERT INTO artists (id, name) VALUES ('ar1', 'Artist')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO albums (id, title, artist_id) VALUES ('al1', 'Album', 'ar1')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO songs (id, title, artist_id, album_id) VALUES ('s1', 'Song', 'ar1', 'al1')")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("DELETE FROM albums WHERE id = 'al1'")
        .execute(&pool)
        .await
        .unwrap();

    let album_id: Option<String> = sqlx::query_scalar("SELECT album_id FROM songs WHERE id = 's1'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(album_id, None);
}

#[tokio::test]
async fn test_saved_items_unique_per_user() {
    let (_dir, pool) = fresh_pool().await;

    sqlx::query("INSERT INTO users (id, email, password_hash, password_salt) VALUES ('u1', 'a@b.c', 'h', 's')")
        .execute(&pool)
        .await
        .unwrap();

    let insert = "INSERT INTO user_saved (id, user_id, type, reference_id) VALUES (?, 'u1', 'song', 'x')";
    sqlx::query(insert).bind("s1").execute(&pool).await.unwrap();
    let dup = sqlx::query(insert).bind("s2").execute(&pool).await;
    assert!(dup.is_err());
}
