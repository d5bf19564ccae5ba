//! Shared helpers for metamusic-web integration tests
//!
//! Each test gets a fresh database in its own temp dir and drives the
//! router in-process with `oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use metamusic_common::db::{init_database, ROLE_ADMIN};
use metamusic_web::db::users;
use metamusic_web::{build_router, AppState, WebConfig};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const BASE_URL: &str = "https://metamusic.test";

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let db = init_database(&dir.path().join("metamusic.db"))
            .await
            .expect("database init");
        let router = build_router(AppState::new(db.clone(), WebConfig::new(BASE_URL)));
        Self {
            router,
            db,
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str, session: Option<&str>) -> Response<Body> {
        self.send(request("GET", uri, session, None)).await
    }

    pub async fn post_form(&self, uri: &str, session: Option<&str>, form: &str) -> Response<Body> {
        self.send(request("POST", uri, session, Some(form))).await
    }

    pub async fn put_form(&self, uri: &str, session: Option<&str>, form: &str) -> Response<Body> {
        self.send(request("PUT", uri, session, Some(form))).await
    }

    pub async fn delete(&self, uri: &str, session: Option<&str>) -> Response<Body> {
        self.send(request("DELETE", uri, session, None)).await
    }

    /// Sign up and return the session cookie value
    pub async fn signup(&self, email: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/api/auth/signup",
                None,
                &format!("email={}&password={}", encode(email), encode(password)),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        session_cookie(&response).expect("signup sets a session cookie")
    }

    /// Signed-in admin session
    pub async fn admin_session(&self) -> String {
        let session = self.signup("admin@metamusic.test", "secret-admin").await;
        assert!(users::set_role(&self.db, "admin@metamusic.test", ROLE_ADMIN)
            .await
            .unwrap());
        session
    }

    /// Create a row through the admin API and return its JSON
    pub async fn admin_create(&self, session: &str, entity: &str, form: &str) -> Value {
        let response = self
            .post_form(&format!("/api/admin/{}", entity), Some(session), form)
            .await;
        assert_eq!(response.status(), StatusCode::CREATED, "create {}", entity);
        json_body(response).await
    }
}

fn request(method: &str, uri: &str, session: Option<&str>, form: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = session {
        builder = builder.header(header::COOKIE, format!("metamusic_session={}", token));
    }
    let body = match form {
        Some(form) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

/// Value of the `metamusic_session` Set-Cookie header, if any
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix("metamusic_session="))
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes()
        .to_vec()
}

pub async fn json_body(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("JSON body")
}

pub async fn text_body(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("UTF-8 body")
}

/// Minimal form-urlencoding for test values
pub fn encode(value: &str) -> String {
    let mut out = String::new();
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
