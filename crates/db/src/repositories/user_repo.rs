//! Repository for the `users` table (the credential store).

use nook_core::types::UserId;
use sqlx::PgPool;

use crate::models::session::Session;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, password_salt, create_time";

/// Provides lookups and creation for user credentials.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, username, email, password_hash, password_salt, create_time)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.password_salt)
            .bind(input.create_time)
            .fetch_one(pool)
            .await
    }

    /// Insert a new user together with its first session.
    ///
    /// Both rows are written in one transaction so a failed session insert
    /// (e.g. a reused token) never leaves an orphaned account behind.
    pub async fn register(
        pool: &PgPool,
        input: &CreateUser,
        session_id: &str,
    ) -> Result<(User, Session), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_query = format!(
            "INSERT INTO users (id, username, email, password_hash, password_salt, create_time)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&user_query)
            .bind(input.id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.password_salt)
            .bind(input.create_time)
            .fetch_one(&mut *tx)
            .await?;

        let session = sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (id, user_id, create_time)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, create_time",
        )
        .bind(session_id)
        .bind(user.id)
        .bind(user.create_time)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((user, session))
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username, ignoring case.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE lower(username) = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }
}
