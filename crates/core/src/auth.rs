//! Bearer-token parsing and the authorization decision.
//!
//! Session tokens are opaque strings generated by clients. Nothing here
//! inspects their shape beyond stripping the `Bearer ` scheme; resolution
//! against the session table happens in the API layer, which then hands the
//! resolved owner to [`authorize`].

use crate::types::UserId;

/// Authorization scheme prefix expected in the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Why a request was refused by the authorization gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    #[error("missing Authorization header")]
    MissingToken,

    #[error("Authorization header must use the Bearer scheme")]
    MalformedHeader,

    #[error("session not found")]
    UnknownSession,

    #[error("session belongs to {resolved}, request claims {claimed}")]
    IdentityMismatch { claimed: UserId, resolved: UserId },

    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Proof that the caller's session resolved to the identity it claimed.
///
/// Only [`authorize`] constructs this, so any code path holding an
/// `Authorized` has passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorized {
    user_id: UserId,
}

impl Authorized {
    /// The user every subsequent write is attributed to.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Extract the session token from an `Authorization` header value.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AuthFailure> {
    let value = header.ok_or(AuthFailure::MissingToken)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthFailure::MalformedHeader)?
        .trim();
    if token.is_empty() {
        return Err(AuthFailure::MissingToken);
    }
    Ok(token)
}

/// Decide whether a caller claiming `claimed` may act, given the owner the
/// session store resolved for its token (`None` when no session matched).
pub fn authorize(claimed: UserId, resolved: Option<UserId>) -> Result<Authorized, AuthFailure> {
    match resolved {
        None => Err(AuthFailure::UnknownSession),
        Some(owner) if owner != claimed => Err(AuthFailure::IdentityMismatch {
            claimed,
            resolved: owner,
        }),
        Some(owner) => Ok(Authorized { user_id: owner }),
    }
}
