//! Dashboard aggregate shapes.

use serde::Serialize;
use sqlx::FromRow;

/// Counts shown to a student about their own records.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentStats {
    pub applications: i64,
    pub documents: i64,
    pub unread_notifications: i64,
}

/// Global counts shown to administrators.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminStats {
    pub applications: i64,
    pub programs: i64,
    pub universities: i64,
    pub users: i64,
}

/// Stats for whichever role asked, tagged with `scope`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum DashboardStats {
    Student(StudentStats),
    Admin(AdminStats),
}
