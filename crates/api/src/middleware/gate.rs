//! The authorization gate in front of every item-store mutation.

use nook_core::auth::{authorize, AuthFailure, Authorized};
use nook_core::types::UserId;
use nook_db::repositories::SessionRepo;
use nook_db::DbPool;

use crate::error::AppResult;
use crate::middleware::auth::BearerToken;

pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Resolve `token` and check that it belongs to `claimed`.
    ///
    /// Any failure aborts the request with 401. Handlers must take the writer
    /// identity from the returned [`Authorized`], never from the request.
    pub async fn authorize(
        pool: &DbPool,
        claimed: UserId,
        token: &BearerToken,
    ) -> AppResult<Authorized> {
        let resolved = SessionRepo::resolve(pool, token.as_str()).await?;

        authorize(claimed, resolved).map_err(|failure| {
            match &failure {
                AuthFailure::IdentityMismatch { claimed, resolved } => tracing::warn!(
                    claimed = %claimed,
                    resolved = %resolved,
                    "Session does not belong to the claimed user"
                ),
                other => tracing::warn!(claimed = %claimed, reason = %other, "Authorization failed"),
            }
            failure.into()
        })
    }
}
