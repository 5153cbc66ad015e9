use serde::{Deserialize, Serialize};

/// Users are identified by a caller-supplied UUID fixed at registration.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Variant index of an item within the catalog (0-based).
pub type VariantId = i32;

/// Collection status code. Its meaning is owned by the item catalog.
pub type ItemStatus = i32;

/// Composite key of a single collection record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemKey {
    pub user_id: UserId,
    pub item_id: String,
    pub variant: VariantId,
}

impl ItemKey {
    pub fn new(user_id: UserId, item_id: impl Into<String>, variant: VariantId) -> Self {
        Self {
            user_id,
            item_id: item_id.into(),
            variant,
        }
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.user_id, self.item_id, self.variant)
    }
}
