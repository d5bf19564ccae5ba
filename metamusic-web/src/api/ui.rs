//! Static pages and sitemap
//!
//! The sign-in and sign-up pages are compiled into the binary and post to
//! the auth API from a small script.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;

use crate::AppState;

const LOGIN_HTML: &str = include_str!("../ui/login.html");
const SIGNUP_HTML: &str = include_str!("../ui/signup.html");
const AUTH_JS: &str = include_str!("../ui/auth.js");
const AUTH_CSS: &str = include_str!("../ui/auth.css");

/// Public page paths listed in the sitemap
pub const SITEMAP_ROUTES: [&str; 8] = [
    "", "/search", "/charts", "/genres", "/login", "/signup", "/profile", "/admin",
];

/// GET /login
pub async fn serve_login() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

/// GET /signup
pub async fn serve_signup() -> Html<&'static str> {
    Html(SIGNUP_HTML)
}

/// GET /static/auth.js
pub async fn serve_auth_js() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript")],
        AUTH_JS,
    )
        .into_response()
}

/// GET /static/auth.css
pub async fn serve_auth_css() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/css")], AUTH_CSS).into_response()
}

/// Render the sitemap for `base_url`, stamping every entry with `lastmod`
pub fn render_sitemap(base_url: &str, lastmod: &str) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for route in SITEMAP_ROUTES {
        xml.push_str(&format!(
            "  <url><loc>{}{}</loc><lastmod>{}</lastmod></url>\n",
            base_url, route, lastmod
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

/// GET /sitemap.xml
pub async fn serve_sitemap(State(state): State<AppState>) -> Response {
    let today = Utc::now().format("%Y-%m-%d").to_string();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        render_sitemap(&state.config.base_url, &today),
    )
        .into_response()
}

pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(serve_login))
        .route("/signup", get(serve_signup))
        .route("/static/auth.js", get(serve_auth_js))
        .route("/static/auth.css", get(serve_auth_css))
        .route("/sitemap.xml", get(serve_sitemap))
}
