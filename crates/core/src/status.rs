//! Application and review status vocabulary.
//!
//! Reviews share the application status set: writing a review copies its
//! status onto the application. The values must match the
//! `ck_applications_status` and `ck_reviews_status` check constraints.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Submitted, not yet picked up.
pub const STATUS_PENDING: &str = "pending";

/// An administrator is looking at it.
pub const STATUS_UNDER_REVIEW: &str = "under_review";

pub const STATUS_APPROVED: &str = "approved";

pub const STATUS_REJECTED: &str = "rejected";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_UNDER_REVIEW,
    STATUS_APPROVED,
    STATUS_REJECTED,
];

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// `validator` hook for DTO fields carrying a status.
pub fn status_field(status: &str) -> Result<(), validator::ValidationError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("status");
        err.message = Some(format!("must be one of: {}", VALID_STATUSES.join(", ")).into());
        Err(err)
    }
}
