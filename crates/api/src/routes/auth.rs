//! Route definitions for sessions and accounts.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST /sessions  -> create_session
/// POST /register  -> register
/// POST /login     -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(auth::create_session))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}
