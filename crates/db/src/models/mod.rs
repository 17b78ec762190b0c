//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A `Summary` shape used when the entity is embedded in another read

pub mod application;
pub mod dashboard;
pub mod document;
pub mod notification;
pub mod profile;
pub mod program;
pub mod review;
pub mod university;
