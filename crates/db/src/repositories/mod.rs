//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. A method holds a pooled
//! connection only for the duration of its own statement or transaction.

pub mod item_repo;
pub mod session_repo;
pub mod user_repo;

pub use item_repo::ItemRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
