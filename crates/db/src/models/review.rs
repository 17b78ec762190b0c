//! Review entity model and DTOs.

use admissions_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::application::ApplicationSummary;
use crate::models::profile::ProfileSummary;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub application_id: DbId,
    pub reviewer_id: DbId,
    pub status: String,
    pub comments: Option<String>,
    pub reviewed_at: Timestamp,
}

/// A review with its reviewer (and, in the admin listing, its application)
/// expanded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewWithRelations {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub review: Review,
    pub reviewer: Option<Json<ProfileSummary>>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<Json<ApplicationSummary>>,
}

/// DTO for recording a review. The reviewer is always the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReview {
    pub application_id: DbId,
    #[validate(custom(function = "admissions_core::status::status_field"))]
    pub status: String,
    pub comments: Option<String>,
}

/// DTO for revising a review. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateReview {
    #[validate(custom(function = "admissions_core::status::status_field"))]
    pub status: Option<String>,
    pub comments: Option<String>,
}
