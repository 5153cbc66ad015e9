//! Collection sync API server library.
//!
//! Exposes config, state, error handling, the authorization gate, and the
//! route tree so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
