//! Admissions gateway HTTP server library.
//!
//! Exposes config, state, error handling, auth extractors and routes so
//! integration tests and the binary entrypoint share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod idempotency;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
