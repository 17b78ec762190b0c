//! Caller context and per-operation capability checks.
//!
//! Handlers build a [`CallerContext`] from the bearer token and ask this
//! module whether the operation is allowed before touching the store.
//! Students act on rows they own; admins act on everything.

use crate::error::CoreError;
use crate::roles::Role;
use crate::status::STATUS_PENDING;
use crate::types::DbId;

/// Identity and role of whoever issued the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerContext {
    pub profile_id: DbId,
    pub role: Role,
}

impl CallerContext {
    pub fn new(profile_id: DbId, role: Role) -> Self {
        Self { profile_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Reject anyone who is not an admin.
    pub fn require_admin(&self) -> Result<(), CoreError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(CoreError::Forbidden("Admin role required".into()))
        }
    }

    /// Allow the owner of a row, or any admin.
    pub fn require_owner_or_admin(&self, owner_id: DbId) -> Result<(), CoreError> {
        if self.is_admin() || self.profile_id == owner_id {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "You may only access your own records".into(),
            ))
        }
    }
}

/// Fields an application update is trying to change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationChange {
    pub program: bool,
    pub status: bool,
}

/// A student may submit only for themselves and only as `pending`. Admins
/// may submit on behalf of any student with any initial status.
pub fn check_application_create(
    ctx: &CallerContext,
    student_id: DbId,
    status: Option<&str>,
) -> Result<(), CoreError> {
    ctx.require_owner_or_admin(student_id)?;

    match status {
        Some(s) if ctx.role == Role::Student && s != STATUS_PENDING => Err(CoreError::Forbidden(
            "Students may only submit pending applications".into(),
        )),
        _ => Ok(()),
    }
}

/// Students may move their own application to another program but never
/// touch its status; after submission the status is the only field an admin
/// may change.
pub fn check_application_update(
    ctx: &CallerContext,
    owner_id: DbId,
    change: ApplicationChange,
) -> Result<(), CoreError> {
    ctx.require_owner_or_admin(owner_id)?;

    match ctx.role {
        Role::Student if change.status => Err(CoreError::Forbidden(
            "Students may not change application status".into(),
        )),
        Role::Admin if change.program => Err(CoreError::Forbidden(
            "Administrators may only change an application's status".into(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const STUDENT: CallerContext = CallerContext {
        profile_id: 10,
        role: Role::Student,
    };
    const ADMIN: CallerContext = CallerContext {
        profile_id: 1,
        role: Role::Admin,
    };

    #[test]
    fn admin_gate() {
        assert!(ADMIN.require_admin().is_ok());
        assert_matches!(STUDENT.require_admin(), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn owner_or_admin() {
        assert!(STUDENT.require_owner_or_admin(10).is_ok());
        assert_matches!(
            STUDENT.require_owner_or_admin(11),
            Err(CoreError::Forbidden(_))
        );
        assert!(ADMIN.require_owner_or_admin(11).is_ok());
    }

    #[test]
    fn student_cannot_submit_for_someone_else() {
        assert!(check_application_create(&STUDENT, 10, None).is_ok());
        assert!(check_application_create(&STUDENT, 10, Some("pending")).is_ok());
        assert!(check_application_create(&STUDENT, 99, None).is_err());
        assert!(check_application_create(&ADMIN, 99, Some("approved")).is_ok());
    }

    #[test]
    fn student_cannot_submit_pre_approved() {
        assert_matches!(
            check_application_create(&STUDENT, 10, Some("approved")),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn student_update_rules() {
        let program_only = ApplicationChange {
            program: true,
            status: false,
        };
        let status_only = ApplicationChange {
            program: false,
            status: true,
        };
        assert!(check_application_update(&STUDENT, 10, program_only).is_ok());
        assert_matches!(
            check_application_update(&STUDENT, 10, status_only),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            check_application_update(&STUDENT, 11, program_only),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn admin_update_rules() {
        let status_only = ApplicationChange {
            program: false,
            status: true,
        };
        let program_only = ApplicationChange {
            program: true,
            status: false,
        };
        assert!(check_application_update(&ADMIN, 10, status_only).is_ok());
        assert_matches!(
            check_application_update(&ADMIN, 10, program_only),
            Err(CoreError::Forbidden(_))
        );
    }
}
