//! Repository for the `sessions` table (the session store).

use nook_core::types::UserId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, create_time";

/// Maps opaque bearer tokens to their owning user.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    ///
    /// Fails on a reused token (primary key) or an unknown user (foreign key).
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (id, user_id, create_time)
             VALUES ($1, $2, COALESCE($3, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(&input.id)
            .bind(input.user_id)
            .bind(input.create_time)
            .fetch_one(pool)
            .await
    }

    /// Find a session by its token.
    pub async fn find(pool: &PgPool, token: &str) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a token to the user that owns it. Any token without a
    /// matching row resolves to `None`.
    pub async fn resolve(pool: &PgPool, token: &str) -> Result<Option<UserId>, sqlx::Error> {
        sqlx::query_scalar::<_, UserId>("SELECT user_id FROM sessions WHERE id = $1")
            .bind(token)
            .fetch_optional(pool)
            .await
    }
}
