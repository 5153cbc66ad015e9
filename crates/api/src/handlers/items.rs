//! Handlers for the `/items` resource.
//!
//! Every handler passes the bearer token and the claimed `userId` through
//! [`AuthorizationGate`] before touching the store, and writes under the
//! identity the gate returns.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use nook_core::items::{normalize_variants, validate_item_id, validate_note, validate_variant};
use nook_core::types::{ItemKey, ItemStatus, UserId, VariantId};
use nook_db::models::item::ItemRecord;
use nook_db::repositories::ItemRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::BearerToken;
use crate::middleware::gate::AuthorizationGate;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string carrying the claimed user for body-less requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: UserId,
}

/// Request body for `POST /items/{itemId}/{variant}/status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusRequest {
    pub user_id: UserId,
    pub status: ItemStatus,
}

/// Request body for `POST /items/{itemId}/batch/status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatusRequest {
    pub user_id: UserId,
    pub status: ItemStatus,
    pub variants: Vec<VariantId>,
}

/// Request body for `POST /items/{itemId}/{variant}/note`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetNoteRequest {
    pub user_id: UserId,
    pub note: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /items?userId=
pub async fn list_items(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<DataResponse<Vec<ItemRecord>>>> {
    let authorized = AuthorizationGate::authorize(&state.pool, query.user_id, &token).await?;
    let items = ItemRepo::list_for_user(&state.pool, authorized.user_id()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /items/{itemId}/{variant}/status
pub async fn set_status(
    State(state): State<AppState>,
    token: BearerToken,
    Path((item_id, variant)): Path<(String, VariantId)>,
    body: Result<Json<SetStatusRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(input) = body?;
    let authorized = AuthorizationGate::authorize(&state.pool, input.user_id, &token).await?;
    validate_item_id(&item_id)?;
    validate_variant(variant)?;

    let key = ItemKey::new(authorized.user_id(), item_id, variant);
    ItemRepo::upsert_status(&state.pool, &key, input.status).await?;

    tracing::info!(key = %key, status = input.status, "Item status set");
    Ok(StatusCode::CREATED)
}

/// POST /items/{itemId}/batch/status
///
/// Writes each listed variant independently. Variants that land stay
/// written; if any variant fails the response is 400.
pub async fn batch_set_status(
    State(state): State<AppState>,
    token: BearerToken,
    Path(item_id): Path<String>,
    body: Result<Json<BatchStatusRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(input) = body?;
    let authorized = AuthorizationGate::authorize(&state.pool, input.user_id, &token).await?;
    validate_item_id(&item_id)?;
    let variants = normalize_variants(&input.variants)?;

    let report = ItemRepo::batch_upsert_status(
        &state.pool,
        authorized.user_id(),
        &item_id,
        input.status,
        &variants,
    )
    .await;

    if !report.is_complete() {
        tracing::error!(
            user_id = %authorized.user_id(),
            item_id = %report.item_id,
            requested = report.total(),
            applied = report.applied.len(),
            failed = report.failed.len(),
            failures = ?report.failed,
            "Batch status update partially failed"
        );
        return Ok(StatusCode::BAD_REQUEST);
    }

    tracing::info!(
        user_id = %authorized.user_id(),
        item_id = %report.item_id,
        status = report.status,
        applied = report.total(),
        "Batch status update applied"
    );
    Ok(StatusCode::CREATED)
}

/// POST /items/{itemId}/{variant}/note
pub async fn set_note(
    State(state): State<AppState>,
    token: BearerToken,
    Path((item_id, variant)): Path<(String, VariantId)>,
    body: Result<Json<SetNoteRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(input) = body?;
    let authorized = AuthorizationGate::authorize(&state.pool, input.user_id, &token).await?;
    validate_item_id(&item_id)?;
    validate_variant(variant)?;
    validate_note(&input.note)?;

    let key = ItemKey::new(authorized.user_id(), item_id, variant);
    ItemRepo::upsert_note(&state.pool, &key, &input.note).await?;

    tracing::info!(key = %key, "Item note set");
    Ok(StatusCode::CREATED)
}

/// DELETE /items/{itemId}/{variant}?userId=
///
/// Returns 204 whether or not a row existed.
pub async fn delete_item(
    State(state): State<AppState>,
    token: BearerToken,
    Path((item_id, variant)): Path<(String, VariantId)>,
    Query(query): Query<UserQuery>,
) -> AppResult<StatusCode> {
    let authorized = AuthorizationGate::authorize(&state.pool, query.user_id, &token).await?;

    let key = ItemKey::new(authorized.user_id(), item_id, variant);
    let removed = ItemRepo::delete(&state.pool, &key).await?;

    tracing::info!(key = %key, removed, "Item deleted");
    Ok(StatusCode::NO_CONTENT)
}
