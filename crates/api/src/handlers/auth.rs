//! Handlers for sessions, registration, and login.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use nook_core::auth::AuthFailure;
use nook_core::error::CoreError;
use nook_core::password::{generate_salt, hash_password, verify_password};
use nook_core::types::{Timestamp, UserId};
use nook_db::models::session::CreateSession;
use nook_db::models::user::CreateUser;
use nook_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /sessions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub session_id: String,
    pub user_id: UserId,
    pub create_time: Option<Timestamp>,
}

/// Request body for `POST /register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_id: UserId,
    #[validate(length(min = 1, max = 32, message = "username must be 1-32 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    pub create_time: Option<Timestamp>,
    pub session_id: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub session_id: String,
}

/// Public identity returned after a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: UserId,
    pub username: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /sessions
///
/// Record a client-generated session token for an existing user.
pub async fn create_session(
    State(state): State<AppState>,
    body: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(input) = body?;
    if input.session_id.is_empty() {
        return Err(CoreError::Validation("sessionId must not be empty".into()).into());
    }

    let session = CreateSession {
        id: input.session_id,
        user_id: input.user_id,
        create_time: input.create_time,
    };
    SessionRepo::create(&state.pool, &session).await?;

    tracing::info!(user_id = %session.user_id, "Session created");
    Ok(StatusCode::CREATED)
}

/// POST /register
///
/// Create an account and its first session in one step.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(mut input) = body?;
    // An empty address means "no email".
    input.email = input.email.take().filter(|e| !e.trim().is_empty());
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    if input.session_id.is_empty() {
        return Err(CoreError::Validation("sessionId must not be empty".into()).into());
    }

    let salt = generate_salt();
    let user = CreateUser {
        id: input.user_id,
        username: input.username,
        email: input.email,
        password_hash: hash_password(&input.password, &salt),
        password_salt: salt,
        create_time: input.create_time,
    };
    let (user, _session) = UserRepo::register(&state.pool, &user, &input.session_id).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");
    Ok(StatusCode::CREATED)
}

/// POST /login
///
/// Verify credentials and bind the client's new session token to the user.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<LoginResponse>>)> {
    let Json(input) = body?;
    if input.session_id.is_empty() {
        return Err(CoreError::Validation("sessionId must not be empty".into()).into());
    }

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .filter(|user| verify_password(&input.password, &user.password_salt, &user.password_hash))
        .ok_or_else(|| {
            tracing::info!(username = %input.username, "Login rejected");
            AppError::from(AuthFailure::InvalidCredentials)
        })?;

    let session = CreateSession {
        id: input.session_id,
        user_id: user.id,
        create_time: None,
    };
    SessionRepo::create(&state.pool, &session).await?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: LoginResponse {
                user_id: user.id,
                username: user.username,
            },
        }),
    ))
}
