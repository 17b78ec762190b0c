//! Failure taxonomy for gateway operations and SQLSTATE classification.
//!
//! Every store failure is mapped onto one of four kinds so callers can react
//! differently: retry transient persistence failures, never retry validation
//! failures, and surface referential-integrity blocks as conflicts.

use serde::Serialize;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
SQLSTATE codes
-------------------------------------------------------------------------- */

pub const SQLSTATE_NOT_NULL_VIOLATION: &str = "23502";
pub const SQLSTATE_FOREIGN_KEY_VIOLATION: &str = "23503";
pub const SQLSTATE_UNIQUE_VIOLATION: &str = "23505";
pub const SQLSTATE_CHECK_VIOLATION: &str = "23514";
pub const SQLSTATE_INVALID_TEXT_REPRESENTATION: &str = "22P02";
pub const SQLSTATE_SERIALIZATION_FAILURE: &str = "40001";
pub const SQLSTATE_DEADLOCK_DETECTED: &str = "40P01";

/// Prefix on unique constraints whose violation is reported as a conflict.
pub const UNIQUE_CONSTRAINT_PREFIX: &str = "uq_";

/* --------------------------------------------------------------------------
Taxonomy
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    NotFound,
    ReferentialIntegrity,
    Persistence,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Validation => "validation",
            FailureKind::NotFound => "not_found",
            FailureKind::ReferentialIntegrity => "referential_integrity",
            FailureKind::Persistence => "persistence",
        }
    }
}

/// Kind of statement that raised a database error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    /// INSERT or UPDATE: a foreign-key violation means the referenced row is
    /// missing.
    Write,
    /// DELETE: a foreign-key violation means dependent rows still exist.
    Delete,
}

/* --------------------------------------------------------------------------
Classification
-------------------------------------------------------------------------- */

/// Map a database error (statement kind, SQLSTATE code, constraint name)
/// onto a [`CoreError`].
///
/// Unknown codes become an internal error with a sanitized message; the
/// caller is expected to log the original error.
pub fn classify_database_error(
    operation: StoreOperation,
    code: Option<&str>,
    constraint: Option<&str>,
) -> CoreError {
    let Some(code) = code else {
        return unclassified();
    };

    match code {
        SQLSTATE_FOREIGN_KEY_VIOLATION if operation == StoreOperation::Delete => {
            CoreError::ReferentialIntegrity(format!(
                "Record is still referenced by dependent rows ({})",
                constraint.unwrap_or("unknown constraint")
            ))
        }
        SQLSTATE_FOREIGN_KEY_VIOLATION => CoreError::Persistence {
            message: format!(
                "Referenced record does not exist ({})",
                constraint.unwrap_or("unknown constraint")
            ),
            transient: false,
        },
        SQLSTATE_NOT_NULL_VIOLATION => CoreError::Persistence {
            message: "A required field is missing".to_string(),
            transient: false,
        },
        SQLSTATE_UNIQUE_VIOLATION => match constraint {
            Some(name) if name.starts_with(UNIQUE_CONSTRAINT_PREFIX) => CoreError::Conflict(
                format!("Duplicate value violates unique constraint: {name}"),
            ),
            _ => unclassified(),
        },
        SQLSTATE_CHECK_VIOLATION => CoreError::Validation(format!(
            "Value rejected by constraint {}",
            constraint.unwrap_or("unknown")
        )),
        SQLSTATE_INVALID_TEXT_REPRESENTATION => {
            CoreError::Validation("Malformed field value".to_string())
        }
        c if is_transient_sqlstate(c) => CoreError::Persistence {
            message: "The data store is temporarily unavailable".to_string(),
            transient: true,
        },
        _ => unclassified(),
    }
}

/// Transport-level failure (pool timeout, closed connection, I/O, TLS).
pub fn transport_failure() -> CoreError {
    CoreError::Persistence {
        message: "The data store is temporarily unavailable".to_string(),
        transient: true,
    }
}

/// Connection exceptions (class 08), transaction rollbacks (40001/40P01),
/// insufficient resources (class 53) and operator intervention (class 57P).
fn is_transient_sqlstate(code: &str) -> bool {
    code.starts_with("08")
        || code == SQLSTATE_SERIALIZATION_FAILURE
        || code == SQLSTATE_DEADLOCK_DETECTED
        || code.starts_with("53")
        || code.starts_with("57P")
}

fn unclassified() -> CoreError {
    CoreError::Internal("Unclassified data store failure".to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::StoreOperation::{Delete, Write};
    use super::*;

    #[test]
    fn fk_violation_on_delete_is_referential_integrity() {
        let err = classify_database_error(
            Delete,
            Some("23503"),
            Some("fk_programs_university_id"),
        );
        assert_matches!(err, CoreError::ReferentialIntegrity(msg) if msg.contains("fk_programs_university_id"));
    }

    #[test]
    fn fk_violation_on_write_is_non_transient_persistence() {
        let err = classify_database_error(Write, Some("23503"), Some("fk_programs_university_id"));
        assert_matches!(err, CoreError::Persistence { transient: false, .. });
        assert_eq!(err.kind(), Some(FailureKind::Persistence));
        assert!(!err.is_retryable());
    }

    #[test]
    fn unique_violation_on_named_constraint_is_conflict() {
        let err = classify_database_error(Write, Some("23505"), Some("uq_profiles_email"));
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[test]
    fn unique_violation_on_unnamed_constraint_is_unclassified() {
        let err = classify_database_error(Write, Some("23505"), Some("profiles_pkey"));
        assert_matches!(err, CoreError::Internal(_));
    }

    #[test]
    fn check_violation_is_validation() {
        let err = classify_database_error(Write, Some("23514"), Some("ck_applications_status"));
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("ck_applications_status"));
    }

    #[test]
    fn connection_and_serialization_failures_are_transient() {
        for code in ["08006", "40001", "40P01", "53300", "57P01"] {
            for operation in [Write, Delete] {
                let err = classify_database_error(operation, Some(code), None);
                assert!(err.is_retryable(), "{code} should be retryable");
            }
        }
    }

    #[test]
    fn missing_code_is_unclassified() {
        assert_matches!(
            classify_database_error(Delete, None, None),
            CoreError::Internal(_)
        );
    }

    #[test]
    fn failure_kind_names() {
        assert_eq!(FailureKind::ReferentialIntegrity.as_str(), "referential_integrity");
        assert_eq!(FailureKind::NotFound.as_str(), "not_found");
    }
}
