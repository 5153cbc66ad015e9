//! Aggregation of per-variant outcomes for a batch status update.
//!
//! A batch is a set of independent single-row writes. Each variant either
//! lands or fails on its own; the report keeps both lists so a failure is
//! never folded into an overall success.

use std::fmt::Display;

use serde::Serialize;

use crate::types::{ItemStatus, VariantId};

/// A variant whose write did not land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantFailure {
    pub variant: VariantId,
    pub reason: String,
}

/// Outcome of one batch status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub item_id: String,
    pub status: ItemStatus,
    /// Variants written, in ascending order.
    pub applied: Vec<VariantId>,
    /// Variants that failed, in ascending order.
    pub failed: Vec<VariantFailure>,
}

impl BatchReport {
    pub fn new(item_id: impl Into<String>, status: ItemStatus) -> Self {
        Self {
            item_id: item_id.into(),
            status,
            applied: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Build a report from `(variant, outcome)` pairs in any completion order.
    pub fn from_outcomes<T, E, I>(item_id: impl Into<String>, status: ItemStatus, outcomes: I) -> Self
    where
        E: Display,
        I: IntoIterator<Item = (VariantId, Result<T, E>)>,
    {
        let mut report = Self::new(item_id, status);
        for (variant, outcome) in outcomes {
            match outcome {
                Ok(_) => report.applied.push(variant),
                Err(e) => report.failed.push(VariantFailure {
                    variant,
                    reason: e.to_string(),
                }),
            }
        }
        report.applied.sort_unstable();
        report.failed.sort_by_key(|f| f.variant);
        report
    }

    /// `true` when every requested variant was written.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.applied.len() + self.failed.len()
    }
}
