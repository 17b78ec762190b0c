//! Document entity model and DTOs.
//!
//! Only the file reference is stored; upload and removal of the bytes happen
//! in the external file store before/after these rows are written.

use admissions_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub application_id: DbId,
    pub file_name: String,
    pub file_url: String,
    pub uploaded_at: Timestamp,
}

/// DTO for attaching an uploaded file to an application.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDocument {
    pub application_id: DbId,
    #[validate(custom(function = "admissions_core::validation::not_blank"))]
    pub file_name: String,
    #[validate(url(message = "must be a valid URL"))]
    pub file_url: String,
}
