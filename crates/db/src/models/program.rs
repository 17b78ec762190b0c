//! Program entity model and DTOs.

use admissions_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::university::UniversitySummary;

/// A row from the `programs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Program {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub university_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A program with its university expanded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgramWithUniversity {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub program: Program,
    pub university: Option<Json<UniversitySummary>>,
}

/// DTO for creating a program under an existing university.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProgram {
    #[validate(custom(function = "admissions_core::validation::not_blank"))]
    pub name: String,
    pub description: Option<String>,
    pub university_id: DbId,
}

/// DTO for updating a program. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProgram {
    #[validate(custom(function = "admissions_core::validation::not_blank"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub university_id: Option<DbId>,
}

/// Program fields embedded in expanded reads.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProgramSummary {
    pub id: DbId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<UniversitySummary>,
}
