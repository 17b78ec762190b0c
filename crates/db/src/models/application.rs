//! Application entity model and DTOs.

use admissions_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::profile::ProfileSummary;
use crate::models::program::ProgramSummary;

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub student_id: DbId,
    pub program_id: DbId,
    pub status: String,
    pub submitted_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An application with its relations expanded.
///
/// Student-scoped reads expand only the program (with its university); the
/// admin listing also expands the student, so `student` is optional at the
/// column level.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationWithRelations {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: Application,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<Json<ProfileSummary>>,
    pub program: Option<Json<ProgramSummary>>,
}

/// DTO for submitting an application. Status defaults to `pending`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApplication {
    pub student_id: DbId,
    pub program_id: DbId,
    #[validate(custom(function = "admissions_core::status::status_field"))]
    pub status: Option<String>,
}

/// DTO for updating an application. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateApplication {
    pub program_id: Option<DbId>,
    #[validate(custom(function = "admissions_core::status::status_field"))]
    pub status: Option<String>,
}

/// Application fields embedded in expanded review reads.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApplicationSummary {
    pub id: DbId,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<ProfileSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<ProgramSummary>,
}
