//! Notification entity model and DTOs.

use admissions_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub student_id: DbId,
    pub message: String,
    pub read_status: bool,
    pub created_at: Timestamp,
}

/// DTO for sending a notification to a student. New notifications are
/// always unread.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotification {
    pub student_id: DbId,
    #[validate(
        custom(function = "admissions_core::validation::not_blank"),
        length(max = 2000, message = "must be at most 2000 characters")
    )]
    pub message: String,
}
