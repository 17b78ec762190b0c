//! Profile entity model and DTOs.

use admissions_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub education: Option<String>,
    pub social_links: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for provisioning a profile. Role defaults to `student`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProfile {
    #[validate(custom(function = "admissions_core::validation::not_blank"))]
    pub full_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(custom(function = "admissions_core::roles::role_field"))]
    pub role: Option<String>,
    pub education: Option<String>,
    #[validate(custom(function = "admissions_core::profile::social_links_field"))]
    pub social_links: Option<serde_json::Value>,
}

/// DTO for updating a profile. The role is fixed at creation and cannot be
/// patched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(custom(function = "admissions_core::validation::not_blank"))]
    pub full_name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: Option<String>,
    #[validate(custom(function = "admissions_core::profile::social_links_field"))]
    pub social_links: Option<serde_json::Value>,
}

/// Profile fields embedded in expanded reads (student, reviewer).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileSummary {
    pub id: DbId,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
