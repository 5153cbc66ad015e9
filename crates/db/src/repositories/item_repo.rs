//! Repository for the `items` table (the item collection store).
//!
//! Every write goes through [`ItemRepo::upsert`], a single
//! `INSERT .. ON CONFLICT DO UPDATE` per key. Columns absent from the
//! [`ItemPatch`] are left untouched, and `update_time` is stamped by the
//! database when the row lock is held, so whichever write commits last also
//! carries the latest timestamp.

use std::collections::BTreeSet;

use nook_core::batch::BatchReport;
use nook_core::types::{ItemKey, ItemStatus, UserId, VariantId};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::item::{ItemPatch, ItemRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, item_id, variant, status, note, update_time";

/// Provides per-key upsert/delete and batched status writes.
pub struct ItemRepo;

impl ItemRepo {
    /// Find the record for a single key.
    pub async fn find(pool: &PgPool, key: &ItemKey) -> Result<Option<ItemRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM items
             WHERE user_id = $1 AND item_id = $2 AND variant = $3"
        );
        sqlx::query_as::<_, ItemRecord>(&query)
            .bind(key.user_id)
            .bind(&key.item_id)
            .bind(key.variant)
            .fetch_optional(pool)
            .await
    }

    /// List a user's whole collection ordered by item and variant.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<ItemRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM items WHERE user_id = $1 ORDER BY item_id, variant"
        );
        sqlx::query_as::<_, ItemRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert the key or update the columns present in `patch`.
    ///
    /// `update_time` never moves backwards for a key.
    pub async fn upsert(
        pool: &PgPool,
        key: &ItemKey,
        patch: &ItemPatch,
    ) -> Result<ItemRecord, StoreError> {
        let query = format!(
            "INSERT INTO items (user_id, item_id, variant, status, note, update_time)
             VALUES ($1, $2, $3, $4, $5, clock_timestamp())
             ON CONFLICT (user_id, item_id, variant) DO UPDATE
             SET status = COALESCE(EXCLUDED.status, items.status),
                 note = COALESCE(EXCLUDED.note, items.note),
                 update_time = GREATEST(items.update_time, clock_timestamp())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItemRecord>(&query)
            .bind(key.user_id)
            .bind(&key.item_id)
            .bind(key.variant)
            .bind(patch.status)
            .bind(&patch.note)
            .fetch_optional(pool)
            .await?
            .ok_or(StoreError::UnexpectedRowCount {
                operation: "upsert item",
                expected: 1,
                actual: 0,
            })
    }

    /// Write the status for a key, leaving any note in place.
    pub async fn upsert_status(
        pool: &PgPool,
        key: &ItemKey,
        status: ItemStatus,
    ) -> Result<ItemRecord, StoreError> {
        Self::upsert(pool, key, &ItemPatch::status(status)).await
    }

    /// Write the note for a key, leaving any status in place.
    pub async fn upsert_note(
        pool: &PgPool,
        key: &ItemKey,
        note: &str,
    ) -> Result<ItemRecord, StoreError> {
        Self::upsert(pool, key, &ItemPatch::note(note)).await
    }

    /// Remove the row for a key.
    ///
    /// Returns `true` if a row was removed; deleting an absent key is a
    /// successful no-op returning `false`.
    pub async fn delete(pool: &PgPool, key: &ItemKey) -> Result<bool, StoreError> {
        let result =
            sqlx::query("DELETE FROM items WHERE user_id = $1 AND item_id = $2 AND variant = $3")
                .bind(key.user_id)
                .bind(&key.item_id)
                .bind(key.variant)
                .execute(pool)
                .await?;
        match result.rows_affected() {
            0 => Ok(false),
            1 => Ok(true),
            actual => Err(StoreError::UnexpectedRowCount {
                operation: "delete item",
                expected: 1,
                actual,
            }),
        }
    }

    /// Write `status` to every variant of `item_id` in `variants`.
    ///
    /// The writes are dispatched concurrently, each as its own single-row
    /// statement on its own pooled connection. There is no enclosing
    /// transaction: variants that land stay written even if siblings fail,
    /// and every failure is carried in the returned report.
    pub async fn batch_upsert_status(
        pool: &PgPool,
        user_id: UserId,
        item_id: &str,
        status: ItemStatus,
        variants: &BTreeSet<VariantId>,
    ) -> BatchReport {
        let writes = variants.iter().map(|&variant| {
            let key = ItemKey::new(user_id, item_id, variant);
            async move { (variant, Self::upsert_status(pool, &key, status).await) }
        });
        let outcomes = futures::future::join_all(writes).await;
        BatchReport::from_outcomes(item_id, status, outcomes)
    }
}
