//! Accounts and sessions

use chrono::{Duration, Utc};
use metamusic_common::auth::{generate_salt, generate_session_token, hash_password};
use metamusic_common::db::{User, ROLE_USER};
use metamusic_common::new_id;
use sqlx::SqlitePool;
use tracing::debug;

/// Stored credentials, never serialized
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credentials {
    pub id: String,
    pub password_hash: String,
    pub password_salt: String,
}

pub async fn find_credentials(db: &SqlitePool, email: &str) -> sqlx::Result<Option<Credentials>> {
    sqlx::query_as::<_, Credentials>(
        "SELECT id, password_hash, password_salt FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn get_user(db: &SqlitePool, id: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT id, email, role, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Create a user with the `user` role
///
/// A duplicate email surfaces as a unique-constraint database error.
pub async fn create_user(db: &SqlitePool, email: &str, password: &str) -> sqlx::Result<User> {
    let salt = generate_salt();
    let hash = hash_password(password, &salt);

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, password_hash, password_salt, role)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, email, role, created_at
        "#,
    )
    .bind(new_id())
    .bind(email)
    .bind(hash)
    .bind(salt)
    .bind(ROLE_USER)
    .fetch_one(db)
    .await
}

/// Change a user's role; returns false when no user has that email
pub async fn set_role(db: &SqlitePool, email: &str, role: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("UPDATE users SET role = ? WHERE email = ?")
        .bind(role)
        .bind(email)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Open a session and return its token
pub async fn create_session(db: &SqlitePool, user_id: &str, ttl_seconds: i64) -> sqlx::Result<String> {
    let token = generate_session_token();
    let expires_at = Utc::now().naive_utc() + Duration::seconds(ttl_seconds);

    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .execute(db)
        .await?;

    Ok(token)
}

/// User owning an unexpired session
pub async fn user_for_session(db: &SqlitePool, token: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.email, u.role, u.created_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = ? AND s.expires_at > ?
        "#,
    )
    .bind(token)
    .bind(Utc::now().naive_utc())
    .fetch_optional(db)
    .await
}

pub async fn delete_session(db: &SqlitePool, token: &str) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(db)
        .await?;
    Ok(())
}

/// Drop a user's expired sessions
pub async fn purge_expired_sessions(db: &SqlitePool, user_id: &str) -> sqlx::Result<()> {
    let result = sqlx::query("DELETE FROM sessions WHERE user_id = ? AND expires_at <= ?")
        .bind(user_id)
        .bind(Utc::now().naive_utc())
        .execute(db)
        .await?;
    if result.rows_affected() > 0 {
        debug!("Purged {} expired sessions", result.rows_affected());
    }
    Ok(())
}
