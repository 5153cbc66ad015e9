//! Validation rules for item writes.

use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::types::VariantId;

/// Longest accepted item identifier.
pub const MAX_ITEM_ID_LENGTH: usize = 64;

/// Longest accepted note, in characters.
pub const MAX_NOTE_LENGTH: usize = 1000;

/// Most distinct variants a single batch request may touch.
pub const MAX_BATCH_VARIANTS: usize = 256;

pub fn validate_item_id(item_id: &str) -> Result<(), CoreError> {
    if item_id.is_empty() {
        return Err(CoreError::Validation("itemId must not be empty".into()));
    }
    if item_id.chars().count() > MAX_ITEM_ID_LENGTH {
        return Err(CoreError::Validation(format!(
            "itemId must be at most {MAX_ITEM_ID_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_variant(variant: VariantId) -> Result<(), CoreError> {
    if variant < 0 {
        return Err(CoreError::Validation(format!(
            "variant must be non-negative, got {variant}"
        )));
    }
    Ok(())
}

pub fn validate_note(note: &str) -> Result<(), CoreError> {
    if note.chars().count() > MAX_NOTE_LENGTH {
        return Err(CoreError::Validation(format!(
            "note must be at most {MAX_NOTE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Collapse a requested variant list into the set a batch will write.
///
/// Duplicates are dropped. The result must be non-empty, within
/// [`MAX_BATCH_VARIANTS`], and contain only valid variants.
pub fn normalize_variants(variants: &[VariantId]) -> Result<BTreeSet<VariantId>, CoreError> {
    if variants.is_empty() {
        return Err(CoreError::Validation("variants must not be empty".into()));
    }
    for &variant in variants {
        validate_variant(variant)?;
    }
    let set: BTreeSet<VariantId> = variants.iter().copied().collect();
    if set.len() > MAX_BATCH_VARIANTS {
        return Err(CoreError::Validation(format!(
            "variants must contain at most {MAX_BATCH_VARIANTS} entries"
        )));
    }
    Ok(set)
}
