/// Authentication endpoints
///
/// Registration and login are public; `/me` requires a valid token.
/// Login failures never say whether the email or the password was wrong.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use taskshare_shared::{
    auth::{
        jwt::{create_token, Claims},
        middleware::AuthContext,
        password::{hash_password, verify_password},
    },
    models::{CreateUser, User, UserSummary},
};
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token plus the authenticated user's public info
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

/// POST /api/auth/register
///
/// Creates an account and returns a token. Duplicate emails (compared
/// case-insensitively) produce a 409.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    let password_hash = hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            name: req.name,
            password_hash,
        },
    )
    .await?;

    let claims = Claims::new(user.id, state.jwt_ttl());
    let token = create_token(&claims, state.jwt_secret())
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.summary(),
        }),
    ))
}

/// POST /api/auth/login
///
/// Verifies credentials and returns a fresh token. Unknown email and
/// wrong password both yield the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized);
    }

    let claims = Claims::new(user.id, state.jwt_ttl());
    let token = create_token(&claims, state.jwt_secret())
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(Json(AuthResponse {
        token,
        user: user.summary(),
    }))
}

/// GET /api/auth/me
///
/// Returns the authenticated user's public info.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserSummary>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(user.summary()))
}
