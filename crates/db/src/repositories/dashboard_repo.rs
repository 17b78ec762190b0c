//! Aggregate counts for the dashboard.

use admissions_core::roles::ROLE_STUDENT;
use admissions_core::types::DbId;
use sqlx::PgPool;

use crate::models::dashboard::{AdminStats, StudentStats};

pub struct DashboardRepo;

impl DashboardRepo {
    /// Counts scoped to one student. Documents are counted through the
    /// student's applications.
    pub async fn student_stats(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<StudentStats, sqlx::Error> {
        sqlx::query_as::<_, StudentStats>(
            "SELECT
                (SELECT COUNT(*) FROM applications WHERE student_id = $1) AS applications,
                (SELECT COUNT(*) FROM documents d
                    JOIN applications a ON a.id = d.application_id
                    WHERE a.student_id = $1) AS documents,
                (SELECT COUNT(*) FROM notifications
                    WHERE student_id = $1 AND read_status = false) AS unread_notifications",
        )
        .bind(student_id)
        .fetch_one(pool)
        .await
    }

    /// System-wide counts. `users` counts student profiles only.
    pub async fn admin_stats(pool: &PgPool) -> Result<AdminStats, sqlx::Error> {
        sqlx::query_as::<_, AdminStats>(
            "SELECT
                (SELECT COUNT(*) FROM applications) AS applications,
                (SELECT COUNT(*) FROM programs) AS programs,
                (SELECT COUNT(*) FROM universities) AS universities,
                (SELECT COUNT(*) FROM profiles WHERE role = $1) AS users",
        )
        .bind(ROLE_STUDENT)
        .fetch_one(pool)
        .await
    }
}
