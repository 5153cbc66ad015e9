//! Session model and DTOs.

use nook_core::types::{Timestamp, UserId};
use sqlx::FromRow;

/// A row from the `sessions` table. The id is the bearer token itself.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: UserId,
    pub create_time: Timestamp,
}

/// DTO for creating a session with a client-generated token.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub id: String,
    pub user_id: UserId,
    /// Defaults to now when absent.
    pub create_time: Option<Timestamp>,
}
