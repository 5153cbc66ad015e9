//! Bearer-token extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use nook_core::auth::parse_bearer;

use crate::error::AppError;
use crate::state::AppState;

/// Session token taken from `Authorization: Bearer <token>`.
///
/// Runs before the body extractor, so a request without a usable header is
/// refused with 401 without its body ever being read. The token is not
/// looked up here; pass it to the gate together with the claimed user.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = parse_bearer(header)?;
        Ok(BearerToken(token.to_string()))
    }
}
