//! University entity model and DTOs.

use admissions_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `universities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct University {
    pub id: DbId,
    pub name: String,
    pub location: Option<String>,
    pub website: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a university.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUniversity {
    #[validate(custom(function = "admissions_core::validation::not_blank"))]
    pub name: String,
    pub location: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub website: Option<String>,
}

/// DTO for updating a university. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUniversity {
    #[validate(custom(function = "admissions_core::validation::not_blank"))]
    pub name: Option<String>,
    pub location: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub website: Option<String>,
}

/// University fields embedded in expanded reads.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UniversitySummary {
    pub id: DbId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}
