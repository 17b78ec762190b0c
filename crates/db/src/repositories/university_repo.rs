//! Repository for the `universities` table.

use admissions_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::university::{CreateUniversity, University, UpdateUniversity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, location, website, created_at, updated_at";

/// Provides CRUD operations for universities.
pub struct UniversityRepo;

impl UniversityRepo {
    /// Insert a new university, returning the created row.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateUniversity,
    ) -> Result<University, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO universities (name, location, website)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, University>(&query)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.website)
            .fetch_one(executor)
            .await
    }

    /// Find a university by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<University>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM universities WHERE id = $1");
        sqlx::query_as::<_, University>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all universities, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<University>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM universities ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, University>(&query).fetch_all(pool).await
    }

    /// Update a university. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUniversity,
    ) -> Result<Option<University>, sqlx::Error> {
        let query = format!(
            "UPDATE universities SET
                name = COALESCE($2, name),
                location = COALESCE($3, location),
                website = COALESCE($4, website)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, University>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.website)
            .fetch_optional(pool)
            .await
    }

    /// Delete a university. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while programs still reference it;
    /// dependents are never cascaded.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM universities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
