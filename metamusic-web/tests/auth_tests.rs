//! Sign-up, login, sessions and the profile page

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{json_body, session_cookie, TestApp};

#[tokio::test]
async fn test_signup_creates_user_session() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/api/auth/signup", None, "email=Listener%40Example.com&password=hunter22")
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));

    let session = session_cookie(&response).unwrap();
    let body = json_body(response).await;
    assert_eq!(body["user"]["email"], "listener@example.com");
    assert_eq!(body["user"]["role"], "user");

    let body = json_body(app.get("/api/auth/session", Some(&session)).await).await;
    assert_eq!(body["user"]["email"], "listener@example.com");
}

#[tokio::test]
async fn test_signup_rejects_bad_input() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/api/auth/signup", None, "email=a%40b.com&password=12345")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["message"], "Password should be at least 6 characters");

    let response = app
        .post_form("/api/auth/signup", None, "email=not-an-email&password=123456")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let app = TestApp::new().await;
    app.signup("dup@example.com", "password1").await;

    let response = app
        .post_form("/api/auth/signup", None, "email=DUP%40example.com&password=password2")
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["error"]["message"], "User already registered");
}

#[tokio::test]
async fn test_login_checks_password() {
    let app = TestApp::new().await;
    app.signup("fan@example.com", "correct-horse").await;

    let response = app
        .post_form("/api/auth/login", None, "email=fan%40example.com&password=wrong-horse")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"]["message"], "Invalid login credentials");

    let response = app
        .post_form("/api/auth/login", None, "email=nobody%40example.com&password=correct-horse")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post_form("/api/auth/login", None, "email=fan%40example.com&password=correct-horse")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_some());
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new().await;
    let session = app.signup("bye@example.com", "password1").await;

    let response = app.post_form("/api/auth/logout", Some(&session), "").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(app.get("/api/auth/session", Some(&session)).await).await;
    assert!(body["user"].is_null());
}

#[tokio::test]
async fn test_bearer_token_accepted() {
    let app = TestApp::new().await;
    let session = app.signup("api@example.com", "password1").await;

    let request = Request::builder()
        .uri("/api/auth/session")
        .header(header::AUTHORIZATION, format!("Bearer {}", session))
        .body(Body::empty())
        .unwrap();
    let body = json_body(app.send(request).await).await;
    assert_eq!(body["user"]["email"], "api@example.com");
}

#[tokio::test]
async fn test_unknown_session_is_anonymous() {
    let app = TestApp::new().await;

    let body = json_body(app.get("/api/auth/session", Some("not-a-token")).await).await;
    assert!(body["user"].is_null());
}

#[tokio::test]
async fn test_guest_profile() {
    let app = TestApp::new().await;

    let response = app.get("/api/profile", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["display_name"], "Guest Listener");
    assert!(body["email"].is_null());
    assert_eq!(body["saved"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_saved_items_require_session() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/api/profile/saved", None, "type=song&reference_id=s1")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.delete("/api/profile/saved/x", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_save_and_remove_items() {
    let app = TestApp::new().await;
    let admin = app.admin_session().await;
    let artist = app.admin_create(&admin, "artists", "name=Nova").await;
    let artist_id = artist["id"].as_str().unwrap();

    let session = app.signup("saver@example.com", "password1").await;
    let form = format!("type=artist&reference_id={}", artist_id);

    let first = json_body(app.post_form("/api/profile/saved", Some(&session), &form).await).await;
    let again = json_body(app.post_form("/api/profile/saved", Some(&session), &form).await).await;
    assert_eq!(first["id"], again["id"]);

    let profile = json_body(app.get("/api/profile", Some(&session)).await).await;
    assert_eq!(profile["display_name"], "saver@example.com");
    let saved = profile["saved"].as_array().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["title"], "Nova");
    assert_eq!(saved[0]["href"], format!("/artist/{}", artist_id));

    // Another user cannot remove it
    let other = app.signup("other@example.com", "password1").await;
    let saved_id = first["id"].as_str().unwrap();
    let response = app
        .delete(&format!("/api/profile/saved/{}", saved_id), Some(&other))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .delete(&format!("/api/profile/saved/{}", saved_id), Some(&session))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_save_rejects_unknown_type() {
    let app = TestApp::new().await;
    let session = app.signup("saver@example.com", "password1").await;

    let response = app
        .post_form("/api/profile/saved", Some(&session), "type=podcast&reference_id=x")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
