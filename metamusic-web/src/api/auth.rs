//! Session authentication
//!
//! Sessions are opaque tokens stored in the `sessions` table. A request
//! carries one either as the `metamusic_session` cookie (browser forms) or
//! as an `Authorization: Bearer` header (API clients); the header wins when
//! both are present.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use metamusic_common::auth::{validate_credentials, verify_password};
use metamusic_common::db::{load_setting_i64, User, SETTING_SESSION_TIMEOUT};
use serde::Serialize;
use tracing::{info, warn};

use crate::db::users;
use crate::error::{ApiError, ApiResult};
use crate::forms::FormFields;
use crate::AppState;

/// Session cookie name
pub const SESSION_COOKIE: &str = "metamusic_session";

/// Where non-admins are sent when they hit an admin route
pub const ADMIN_LOGIN_REDIRECT: &str = "/login?redirect=/admin";

const DEFAULT_SESSION_TIMEOUT: i64 = 604_800;

/// Session token from the Bearer header or the session cookie
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
}

async fn lookup_user(state: &AppState, headers: &HeaderMap) -> ApiResult<Option<User>> {
    match session_token(headers) {
        Some(token) => Ok(users::user_for_session(&state.db, &token).await?),
        None => Ok(None),
    }
}

/// Signed-in user; rejects with 401 when there is no valid session
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        lookup_user(state, &parts.headers)
            .await?
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("Not signed in".to_string()))
    }
}

/// Signed-in user if any; never rejects for a missing session
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(lookup_user(state, &parts.headers).await?))
    }
}

/// Admin gate for `/api/admin/*`
///
/// Anonymous users and non-admins are redirected to the login page. The
/// admin's `User` is placed in request extensions for handlers.
pub async fn require_admin(
    MaybeUser(user): MaybeUser,
    mut request: Request,
    next: Next,
) -> Response {
    match user {
        Some(user) if user.is_admin() => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Some(user) => {
            warn!("Non-admin {} denied access to {}", user.email, request.uri().path());
            Redirect::temporary(ADMIN_LOGIN_REDIRECT).into_response()
        }
        None => Redirect::temporary(ADMIN_LOGIN_REDIRECT).into_response(),
    }
}

/// Session state returned by the auth endpoints
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<User>,
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

async fn start_session(state: &AppState, jar: CookieJar, user: &User) -> ApiResult<CookieJar> {
    let ttl = load_setting_i64(&state.db, SETTING_SESSION_TIMEOUT, DEFAULT_SESSION_TIMEOUT).await?;
    users::purge_expired_sessions(&state.db, &user.id).await?;
    let token = users::create_session(&state.db, &user.id, ttl).await?;
    Ok(jar.add(session_cookie(token)))
}

/// POST /api/auth/signup
///
/// Form fields: `email`, `password`. Creates a `user`-role account and
/// signs it in.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<FormFields>,
) -> ApiResult<(StatusCode, CookieJar, Json<SessionResponse>)> {
    let password = form.text("password");
    let email = validate_credentials(&form.text("email"), &password)?;

    if users::find_credentials(&state.db, &email).await?.is_some() {
        return Err(ApiError::Conflict("User already registered".to_string()));
    }

    let user = match users::create_user(&state.db, &email, &password).await {
        Ok(user) => user,
        // Lost a race with a concurrent sign-up
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(ApiError::Conflict("User already registered".to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    info!("New account: {}", user.email);

    let jar = start_session(&state, jar, &user).await?;
    Ok((
        StatusCode::CREATED,
        jar,
        Json(SessionResponse { user: Some(user) }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<FormFields>,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let invalid = || ApiError::Unauthorized("Invalid login credentials".to_string());

    let email = form.text("email").trim().to_lowercase();
    let password = form.text("password");

    let credentials = users::find_credentials(&state.db, &email)
        .await?
        .ok_or_else(invalid)?;
    if !verify_password(&password, &credentials.password_salt, &credentials.password_hash) {
        return Err(invalid());
    }

    let user = users::get_user(&state.db, &credentials.id)
        .await?
        .ok_or_else(invalid)?;

    let jar = start_session(&state, jar, &user).await?;
    Ok((jar, Json(SessionResponse { user: Some(user) })))
}

/// POST /api/auth/logout
///
/// Always succeeds; an unknown or missing session is simply cleared.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    if let Some(token) = session_token(&headers) {
        users::delete_session(&state.db, &token).await?;
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, Json(SessionResponse { user: None })))
}

/// GET /api/auth/session
pub async fn current_session(MaybeUser(user): MaybeUser) -> Json<SessionResponse> {
    Json(SessionResponse { user })
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/session", get(current_session))
}
