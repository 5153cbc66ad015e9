//! Domain logic for the item-collection tracker.
//!
//! This crate performs no I/O. It holds the identifier types, the error
//! taxonomy, the authorization decision, credential hashing, and the
//! validation and aggregation rules applied around item writes.

pub mod auth;
pub mod batch;
pub mod error;
pub mod items;
pub mod password;
pub mod types;
