//! Domain primitives for the admissions gateway.
//!
//! Everything here is pure: no database or HTTP types. The db and api crates
//! build on these types and validation helpers.

pub mod access;
pub mod error;
pub mod failure;
pub mod profile;
pub mod roles;
pub mod status;
pub mod types;
pub mod validation;
