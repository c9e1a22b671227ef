use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use service::auth::domain::{AuthUser, LoginInput, RegisterInput, SessionUser};

use common::types::MessageBody;

use crate::errors::{JsonApiError, JsonBody};
use crate::state::{AppState, CookieSettings};

/// Fields are optional so a missing key is a 400 with a readable message
/// rather than a deserialisation failure.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserView,
}

impl From<AuthUser> for UserResponse {
    fn from(u: AuthUser) -> Self {
        Self { user: UserView { email: u.email, name: u.name } }
    }
}

fn present(v: &Option<String>) -> bool {
    v.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn session_cookie(settings: &CookieSettings, token: String) -> Cookie<'static> {
    Cookie::build((settings.name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .max_age(time::Duration::seconds(settings.max_age_secs))
        .build()
}

#[utoipa::path(post, path = "/api/register", tag = "auth", request_body = crate::openapi::RegisterRequestDoc,
    responses((status = 201, description = "Registered", body = crate::openapi::MessageDoc),
              (status = 400, description = "Missing or invalid fields", body = crate::openapi::ErrorDoc),
              (status = 409, description = "Email already registered", body = crate::openapi::ErrorDoc)))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageBody>), JsonApiError> {
    if !(present(&req.email) && present(&req.password) && present(&req.name)) {
        return Err(JsonApiError::bad_request("email, password and name are required"));
    }
    let input = RegisterInput {
        email: req.email.unwrap_or_default(),
        name: req.name.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    };
    state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(MessageBody::new("user registered"))))
}

#[utoipa::path(post, path = "/api/login", tag = "auth", request_body = crate::openapi::LoginRequestDoc,
    responses((status = 200, description = "Logged in; session cookie set", body = crate::openapi::UserResponseDoc),
              (status = 400, description = "Missing fields", body = crate::openapi::ErrorDoc),
              (status = 401, description = "Wrong password", body = crate::openapi::ErrorDoc),
              (status = 404, description = "Unknown email", body = crate::openapi::ErrorDoc)))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), JsonApiError> {
    // an empty password is still checked against the stored hash
    if !present(&req.email) || req.password.is_none() {
        return Err(JsonApiError::bad_request("email and password are required"));
    }
    let input = LoginInput {
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    };
    let session = state.auth.login(input).await?;
    let jar = jar.add(session_cookie(&state.cookie, session.token));
    Ok((jar, Json(session.user.into())))
}

#[utoipa::path(post, path = "/api/logout", tag = "auth", responses((status = 204, description = "Session cookie cleared")))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build((state.cookie.name.clone(), "")).path("/"));
    (jar, StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/me", tag = "auth",
    responses((status = 200, description = "Current user", body = crate::openapi::UserResponseDoc),
              (status = 401, description = "No valid session", body = crate::openapi::ErrorDoc)))]
pub async fn me(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<UserResponse>, JsonApiError> {
    let user = state.auth.current_user(session.user_id).await?;
    Ok(Json(user.into()))
}
