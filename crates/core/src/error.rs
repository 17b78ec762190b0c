use crate::failure::FailureKind;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A delete or re-key was blocked because other rows still reference the target.
    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrity(String),

    /// The store rejected or failed the write. `transient` marks failures
    /// (connection loss, serialization conflicts) that may succeed on retry.
    #[error("Persistence error: {message}")]
    Persistence { message: String, transient: bool },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Position of this error in the gateway failure taxonomy.
    ///
    /// Access-control and uniqueness errors sit outside the taxonomy and
    /// return `None`.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            CoreError::NotFound { .. } => Some(FailureKind::NotFound),
            CoreError::Validation(_) => Some(FailureKind::Validation),
            CoreError::ReferentialIntegrity(_) => Some(FailureKind::ReferentialIntegrity),
            CoreError::Persistence { .. } | CoreError::Internal(_) => {
                Some(FailureKind::Persistence)
            }
            CoreError::Conflict(_) | CoreError::Unauthorized(_) | CoreError::Forbidden(_) => None,
        }
    }

    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Persistence { transient: true, .. })
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let detail = errs
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .next()
                    .unwrap_or_else(|| {
                        errs.first()
                            .map(|e| e.code.to_string())
                            .unwrap_or_default()
                    });
                format!("{field}: {detail}")
            })
            .collect();
        fields.sort();
        CoreError::Validation(fields.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_kinds() {
        let not_found = CoreError::NotFound {
            entity: "Application",
            id: 7,
        };
        assert_eq!(not_found.kind(), Some(FailureKind::NotFound));
        assert_eq!(
            CoreError::Validation("x".into()).kind(),
            Some(FailureKind::Validation)
        );
        assert_eq!(
            CoreError::ReferentialIntegrity("x".into()).kind(),
            Some(FailureKind::ReferentialIntegrity)
        );
        assert_eq!(CoreError::Forbidden("x".into()).kind(), None);
    }

    #[test]
    fn only_transient_persistence_is_retryable() {
        let transient = CoreError::Persistence {
            message: "connection reset".into(),
            transient: true,
        };
        let rejected = CoreError::Persistence {
            message: "bad reference".into(),
            transient: false,
        };
        assert!(transient.is_retryable());
        assert!(!rejected.is_retryable());
        assert!(!CoreError::Validation("blank".into()).is_retryable());
    }

    #[test]
    fn validation_errors_flatten_into_sorted_message() {
        let mut errors = validator::ValidationErrors::new();
        let mut name = validator::ValidationError::new("length");
        name.message = Some("must not be blank".into());
        errors.add("name", name);
        errors.add("email", validator::ValidationError::new("email"));

        let err = CoreError::from(errors);
        match err {
            CoreError::Validation(msg) => {
                assert_eq!(msg, "email: email; name: must not be blank");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
