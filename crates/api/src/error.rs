use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nook_core::auth::AuthFailure;
use nook_core::error::CoreError;
use nook_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and the store errors from
/// `nook_db`. Responses carry a bare status code, plus a short text body
/// for validation failures only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `nook_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An item-store write that failed or touched the wrong number of rows.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        AppError::Core(CoreError::Unauthorized(failure))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(CoreError::Validation(msg)) | AppError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "Rejected request");
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            AppError::Core(CoreError::Unauthorized(failure)) => {
                tracing::debug!(error = %failure, "Unauthorized request");
                StatusCode::UNAUTHORIZED.into_response()
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store write failed");
                StatusCode::BAD_REQUEST.into_response()
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                StatusCode::BAD_REQUEST.into_response()
            }
        }
    }
}
