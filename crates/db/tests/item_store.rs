//! Integration tests for the item collection store.
//!
//! Exercises per-key upsert/delete semantics, batch fan-out, and
//! last-write-wins ordering against a real database.

use std::collections::BTreeSet;

use nook_core::password::{generate_salt, hash_password};
use nook_core::types::{ItemKey, UserId};
use nook_db::models::item::ItemPatch;
use nook_db::models::user::CreateUser;
use nook_db::repositories::{ItemRepo, UserRepo};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, username: &str) -> UserId {
    let salt = generate_salt();
    let input = CreateUser {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: None,
        password_hash: hash_password("pw", &salt),
        password_salt: salt,
        create_time: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

fn variants(values: &[i32]) -> BTreeSet<i32> {
    values.iter().copied().collect()
}

// ---------------------------------------------------------------------------
// Single-key writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_status_overwrites_first(pool: PgPool) {
    let user = create_user(&pool, "overwrite").await;
    let key = ItemKey::new(user, "lamp", 0);

    let first = ItemRepo::upsert_status(&pool, &key, 1).await.unwrap();
    let second = ItemRepo::upsert_status(&pool, &key, 2).await.unwrap();

    let stored = ItemRepo::find(&pool, &key).await.unwrap().unwrap();
    assert_eq!(stored.status, Some(2));
    assert!(second.update_time >= first.update_time);
    assert_eq!(stored.update_time, second.update_time);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_status_twice_is_idempotent(pool: PgPool) {
    let user = create_user(&pool, "idempotent").await;
    let key = ItemKey::new(user, "lamp", 0);

    let first = ItemRepo::upsert_status(&pool, &key, 3).await.unwrap();
    let second = ItemRepo::upsert_status(&pool, &key, 3).await.unwrap();

    assert_eq!(second.status, Some(3));
    assert_eq!(second.note, None);
    assert!(second.update_time >= first.update_time, "update_time still advances");
    assert_eq!(ItemRepo::list_for_user(&pool, user).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_on_new_key_leaves_status_unset(pool: PgPool) {
    let user = create_user(&pool, "notefirst").await;
    let key = ItemKey::new(user, "shirt", 3);

    let created = ItemRepo::upsert_note(&pool, &key, "hello").await.unwrap();
    assert_eq!(created.status, None);
    assert_eq!(created.note.as_deref(), Some("hello"));

    let updated = ItemRepo::upsert_status(&pool, &key, 2).await.unwrap();
    assert_eq!(updated.status, Some(2));
    assert_eq!(updated.note.as_deref(), Some("hello"), "status write must keep note");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_and_note_merge(pool: PgPool) {
    let user = create_user(&pool, "merge").await;
    let key = ItemKey::new(user, "chair", 1);

    ItemRepo::upsert_status(&pool, &key, 4).await.unwrap();
    ItemRepo::upsert_note(&pool, &key, "trade for a lamp").await.unwrap();

    let stored = ItemRepo::find(&pool, &key).await.unwrap().unwrap();
    assert_eq!(stored.status, Some(4), "note write must keep status");
    assert_eq!(stored.note.as_deref(), Some("trade for a lamp"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_with_both_columns(pool: PgPool) {
    let user = create_user(&pool, "patch").await;
    let key = ItemKey::new(user, "rug", 0);

    let patch = ItemPatch {
        status: Some(1),
        note: Some("both".into()),
    };
    let record = ItemRepo::upsert(&pool, &key, &patch).await.unwrap();
    assert_eq!(record.status, Some(1));
    assert_eq!(record.note.as_deref(), Some("both"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_keys_are_scoped_per_user(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    ItemRepo::upsert_status(&pool, &ItemKey::new(alice, "lamp", 0), 1)
        .await
        .unwrap();
    ItemRepo::upsert_status(&pool, &ItemKey::new(bob, "lamp", 0), 2)
        .await
        .unwrap();

    let alice_items = ItemRepo::list_for_user(&pool, alice).await.unwrap();
    let bob_items = ItemRepo::list_for_user(&pool, bob).await.unwrap();
    assert_eq!(alice_items.len(), 1);
    assert_eq!(alice_items[0].status, Some(1));
    assert_eq!(bob_items[0].status, Some(2));
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_row(pool: PgPool) {
    let user = create_user(&pool, "deleter").await;
    let key = ItemKey::new(user, "lamp", 0);
    ItemRepo::upsert_status(&pool, &key, 1).await.unwrap();

    let removed = ItemRepo::delete(&pool, &key).await.unwrap();

    assert!(removed);
    assert!(ItemRepo::find(&pool, &key).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_absent_key_is_noop(pool: PgPool) {
    let user = create_user(&pool, "noop").await;
    let other = ItemKey::new(user, "lamp", 1);
    ItemRepo::upsert_status(&pool, &other, 1).await.unwrap();
    let before = ItemRepo::list_for_user(&pool, user).await.unwrap();

    let removed = ItemRepo::delete(&pool, &ItemKey::new(user, "lamp", 0))
        .await
        .expect("deleting an absent key must succeed");

    assert!(!removed);
    assert_eq!(ItemRepo::list_for_user(&pool, user).await.unwrap(), before);
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_writes_every_variant(pool: PgPool) {
    let user = create_user(&pool, "batcher").await;

    let report =
        ItemRepo::batch_upsert_status(&pool, user, "shirt", 2, &variants(&[1, 2, 3])).await;

    assert!(report.is_complete());
    assert_eq!(report.applied, vec![1, 2, 3]);
    let items = ItemRepo::list_for_user(&pool, user).await.unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i.item_id == "shirt" && i.status == Some(2)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_leaves_omitted_variants_alone(pool: PgPool) {
    let user = create_user(&pool, "partial").await;
    ItemRepo::batch_upsert_status(&pool, user, "shirt", 2, &variants(&[1, 2, 3])).await;
    let before = ItemRepo::find(&pool, &ItemKey::new(user, "shirt", 2))
        .await
        .unwrap()
        .unwrap();

    let report = ItemRepo::batch_upsert_status(&pool, user, "shirt", 5, &variants(&[1, 3])).await;

    assert!(report.is_complete());
    let after = ItemRepo::find(&pool, &ItemKey::new(user, "shirt", 2))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after, before, "variant 2 was not in the batch");
    let v1 = ItemRepo::find(&pool, &ItemKey::new(user, "shirt", 1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(v1.status, Some(5));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_reports_partial_failure(pool: PgPool) {
    let user = create_user(&pool, "failing").await;

    // -1 violates the variant check constraint; 0 and 4 must still land.
    let report =
        ItemRepo::batch_upsert_status(&pool, user, "lamp", 1, &variants(&[-1, 0, 4])).await;

    assert!(!report.is_complete());
    assert_eq!(report.applied, vec![0, 4]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].variant, -1);
    assert_eq!(ItemRepo::list_for_user(&pool, user).await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_writes_last_to_commit_wins(pool: PgPool) {
    let user = create_user(&pool, "racer").await;
    let key = ItemKey::new(user, "lamp", 0);

    let (a, b) = tokio::join!(
        ItemRepo::upsert_status(&pool, &key, 1),
        ItemRepo::upsert_status(&pool, &key, 2),
    );
    let a = a.unwrap();
    let b = b.unwrap();

    let stored = ItemRepo::find(&pool, &key).await.unwrap().unwrap();
    assert_eq!(stored.update_time, a.update_time.max(b.update_time));
    if a.update_time == b.update_time {
        assert!(stored.status == a.status || stored.status == b.status);
    } else {
        let latest = if a.update_time > b.update_time { &a } else { &b };
        assert_eq!(stored.status, latest.status);
    }
}
