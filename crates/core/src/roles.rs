//! Well-known role names and the typed [`Role`] they parse into.
//!
//! These must match the `ck_profiles_role` check constraint in
//! `20260301000001_create_profiles.sql`.

use crate::error::CoreError;

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_ADMIN];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            ROLE_STUDENT => Ok(Role::Student),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => ROLE_STUDENT,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

/// `validator` hook for DTO fields carrying a role name.
pub fn role_field(value: &str) -> Result<(), validator::ValidationError> {
    if VALID_ROLES.contains(&value) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("role");
        err.message = Some(format!("must be one of: {}", VALID_ROLES.join(", ")).into());
        Err(err)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles() {
        assert_eq!(Role::parse("student").unwrap(), Role::Student);
        assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = Role::parse("reviewer").unwrap_err();
        assert!(err.to_string().contains("reviewer"));
        assert!(role_field("reviewer").is_err());
        assert!(role_field("admin").is_ok());
    }
}
