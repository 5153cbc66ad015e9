//! Row models and DTOs, one module per table.

pub mod item;
pub mod session;
pub mod user;
