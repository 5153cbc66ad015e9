//! Route definitions for the `/items` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET    /                          -> list_items (?userId=)
/// POST   /{item_id}/batch/status    -> batch_set_status
/// POST   /{item_id}/{variant}/status -> set_status
/// POST   /{item_id}/{variant}/note  -> set_note
/// DELETE /{item_id}/{variant}       -> delete_item (?userId=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items))
        .route("/{item_id}/batch/status", post(items::batch_set_status))
        .route("/{item_id}/{variant}/status", post(items::set_status))
        .route("/{item_id}/{variant}/note", post(items::set_note))
        .route("/{item_id}/{variant}", delete(items::delete_item))
}
