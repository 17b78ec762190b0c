//! Repository for the `applications` table.

use admissions_core::status::STATUS_PENDING;
use admissions_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::application::{
    Application, ApplicationWithRelations, CreateApplication, UpdateApplication,
};
use crate::relations::{Expansion, JoinedRead};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, program_id, status, submitted_at, updated_at";

/// A student's own listing: the full program and its full university.
const FOR_STUDENT: JoinedRead = JoinedRead {
    table: "applications",
    alias: "a",
    columns: COLUMNS,
    expansions: &[Expansion {
        key: "program",
        table: "programs",
        alias: "p",
        foreign_key: "program_id",
        columns: &["id", "name", "description", "university_id"],
        nested: &[Expansion {
            key: "university",
            table: "universities",
            alias: "u",
            foreign_key: "university_id",
            columns: &["id", "name", "location", "website"],
            nested: &[],
        }],
    }],
};

/// Administrative reads: applicant identity plus program and university names.
const FOR_ADMIN: JoinedRead = JoinedRead {
    table: "applications",
    alias: "a",
    columns: COLUMNS,
    expansions: &[
        Expansion {
            key: "student",
            table: "profiles",
            alias: "s",
            foreign_key: "student_id",
            columns: &["id", "full_name", "email"],
            nested: &[],
        },
        Expansion {
            key: "program",
            table: "programs",
            alias: "p",
            foreign_key: "program_id",
            columns: &["id", "name"],
            nested: &[Expansion {
                key: "university",
                table: "universities",
                alias: "u",
                foreign_key: "university_id",
                columns: &["id", "name"],
                nested: &[],
            }],
        },
    ],
};

/// Provides CRUD operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application, returning the created row.
    ///
    /// A missing status is stored as `pending`.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO applications (student_id, program_id, status)
             VALUES ($1, $2, COALESCE($3, '{STATUS_PENDING}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(input.student_id)
            .bind(input.program_id)
            .bind(&input.status)
            .fetch_one(executor)
            .await
    }

    /// Find an application by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an application with its applicant and program expanded.
    pub async fn find_with_relations(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ApplicationWithRelations>, sqlx::Error> {
        let query = format!("{} WHERE a.id = $1", FOR_ADMIN.select_sql());
        sqlx::query_as::<_, ApplicationWithRelations>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one student's applications with program and university, newest first.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<ApplicationWithRelations>, sqlx::Error> {
        let query = format!(
            "{} WHERE a.student_id = $1 ORDER BY a.submitted_at DESC, a.id DESC",
            FOR_STUDENT.select_sql()
        );
        sqlx::query_as::<_, ApplicationWithRelations>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// List every application with applicant and program, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ApplicationWithRelations>, sqlx::Error> {
        let query = format!(
            "{} ORDER BY a.submitted_at DESC, a.id DESC",
            FOR_ADMIN.select_sql()
        );
        sqlx::query_as::<_, ApplicationWithRelations>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an application. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateApplication,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET
                program_id = COALESCE($2, program_id),
                status = COALESCE($3, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(input.program_id)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete an application and, by cascade, its documents and reviews.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
