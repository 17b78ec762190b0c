//! Repository for the `notifications` table.

use admissions_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::notification::{CreateNotification, Notification};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, message, read_status, created_at";

/// Provides data access for student notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a new unread notification.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO notifications (student_id, message)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.student_id)
            .bind(&input.message)
            .fetch_one(executor)
            .await
    }

    /// Find a notification by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a student's notifications, newest first.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE student_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a notification as read.
    ///
    /// Marking an already-read notification succeeds and returns it unchanged.
    /// Returns `None` only if the notification does not exist.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "UPDATE notifications SET read_status = true
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count unread notifications for a student.
    pub async fn unread_count(pool: &PgPool, student_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE student_id = $1 AND read_status = false",
        )
        .bind(student_id)
        .fetch_one(pool)
        .await?;
        Ok(count.0)
    }

    /// Delete a notification. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
