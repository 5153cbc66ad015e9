//! Authentication and authorization for item routes.
//!
//! - [`auth::BearerToken`] -- Extracts the session token from the `Authorization` header.
//! - [`gate::AuthorizationGate`] -- Checks that the token belongs to the claimed user.

pub mod auth;
pub mod gate;
