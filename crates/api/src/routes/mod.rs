pub mod auth;
pub mod items;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// /health                                   liveness and database check
///
/// /sessions                                 create session (public)
/// /register                                 register (public)
/// /login                                    login (public)
///
/// /items                                    list collection (bearer)
/// /items/{itemId}/batch/status              batch status (bearer)
/// /items/{itemId}/{variant}/status          set status (bearer)
/// /items/{itemId}/{variant}/note            set note (bearer)
/// /items/{itemId}/{variant}                 delete (bearer)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::router())
        .nest("/items", items::router())
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
}

/// GET /health
///
/// 200 while the pool can reach Postgres, 503 otherwise, so a load balancer
/// stops routing sync traffic to an instance whose writes would all fail.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    let db_healthy = match nook_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    let (code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(Health {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }),
    )
}
