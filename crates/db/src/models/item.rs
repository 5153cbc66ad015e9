//! Collection item model and the typed partial-update contract.

use nook_core::types::{ItemStatus, Timestamp, UserId, VariantId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `items` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub user_id: UserId,
    pub item_id: String,
    pub variant: VariantId,
    /// `None` until a status has been written for this key.
    pub status: Option<ItemStatus>,
    pub note: Option<String>,
    pub update_time: Timestamp,
}

/// Columns to write for one key. `None` leaves the column as it is on update
/// and NULL on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub status: Option<ItemStatus>,
    pub note: Option<String>,
}

impl ItemPatch {
    pub fn status(status: ItemStatus) -> Self {
        Self {
            status: Some(status),
            note: None,
        }
    }

    pub fn note(note: impl Into<String>) -> Self {
        Self {
            status: None,
            note: Some(note.into()),
        }
    }
}
