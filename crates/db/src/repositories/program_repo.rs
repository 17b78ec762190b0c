//! Repository for the `programs` table.

use admissions_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::program::{CreateProgram, Program, ProgramWithUniversity, UpdateProgram};
use crate::relations::{Expansion, JoinedRead};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, university_id, created_at, updated_at";

/// Listing read: every program with its university.
const WITH_UNIVERSITY: JoinedRead = JoinedRead {
    table: "programs",
    alias: "p",
    columns: COLUMNS,
    expansions: &[Expansion {
        key: "university",
        table: "universities",
        alias: "u",
        foreign_key: "university_id",
        columns: &["id", "name", "location", "website"],
        nested: &[],
    }],
};

/// Provides CRUD operations for programs.
pub struct ProgramRepo;

impl ProgramRepo {
    /// Insert a new program, returning the created row.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateProgram,
    ) -> Result<Program, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO programs (name, description, university_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.university_id)
            .fetch_one(executor)
            .await
    }

    /// Find a program by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Program>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programs WHERE id = $1");
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all programs with their university, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProgramWithUniversity>, sqlx::Error> {
        let query = format!(
            "{} ORDER BY p.created_at DESC, p.id DESC",
            WITH_UNIVERSITY.select_sql()
        );
        sqlx::query_as::<_, ProgramWithUniversity>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a program. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProgram,
    ) -> Result<Option<Program>, sqlx::Error> {
        let query = format!(
            "UPDATE programs SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                university_id = COALESCE($4, university_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.university_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a program. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while applications reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
