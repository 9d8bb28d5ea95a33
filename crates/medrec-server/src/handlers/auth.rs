//! Registration, login, and token lifecycle handlers.

use axum::{Json, extract::State, http::StatusCode};
use medrec_auth::{BearerAuth, password};
use medrec_core::{Role, User};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Carries the refresh token for logout and refresh. The field is
/// optional so a missing token answers 400, not a deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

impl RefreshTokenRequest {
    fn token(&self) -> Result<&str, ApiError> {
        self.refresh_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::bad_request("refresh token required"))
    }
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let hash = password::hash_password(&req.password)?;
    let user = User::new(req.username, hash, req.role);

    // A taken username surfaces as a storage failure (500), not a 409.
    state.users.create(&user).await?;
    tracing::info!(username = %user.username, role = %user.role, "User registered");

    Ok((StatusCode::CREATED, Json(json!({ "msg": "User registered" }))))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or_else(|| medrec_auth::AuthError::unauthorized("invalid credentials"))?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        return Err(medrec_auth::AuthError::unauthorized("invalid credentials").into());
    }

    let pair = state.auth.service.issue_pair(&user.id, user.role)?;
    tracing::info!(username = %user.username, "Login");

    Ok(Json(json!({
        "accessToken": pair.access_token,
        "refreshToken": pair.refresh_token,
        "role": user.role,
    })))
}

/// `POST /api/auth/logout`
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<Json<Value>, ApiError> {
    let token = req.token()?;
    state.auth.service.logout(token).await?;
    Ok(Json(json!({ "msg": "Logged out" })))
}

/// `POST /api/auth/refresh`
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<Json<medrec_auth::TokenPair>, ApiError> {
    let token = req.token()?;
    let pair = state.auth.service.refresh(token).await?;
    Ok(Json(pair))
}

/// `GET /api/auth/profile` — any authenticated identity.
pub async fn profile(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users
        .find_by_id(&ctx.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(user))
}

/// `GET /api/auth/users` — any authenticated identity. Password hashes
/// are excluded by the user type's serialization.
pub async fn list_users(
    State(state): State<AppState>,
    BearerAuth(_ctx): BearerAuth,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.list_all().await?))
}
