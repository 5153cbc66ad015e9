//! User entity model and DTOs.

use nook_core::types::{Timestamp, UserId};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash and salt -- never serialize this to a response.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub password_salt: String,
    pub create_time: Timestamp,
}

/// DTO for creating a new user. The hash and salt are computed by the caller.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub password_salt: String,
    /// Defaults to now when absent.
    pub create_time: Option<Timestamp>,
}
