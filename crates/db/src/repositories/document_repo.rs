//! Repository for the `documents` table.

use admissions_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::document::{CreateDocument, Document};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, application_id, file_name, file_url, uploaded_at";

/// Provides CRUD operations for application documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Record a document reference, returning the created row.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateDocument,
    ) -> Result<Document, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO documents (application_id, file_name, file_url)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(input.application_id)
            .bind(&input.file_name)
            .bind(&input.file_url)
            .fetch_one(executor)
            .await
    }

    /// Find a document by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List documents attached to an application, newest first.
    pub async fn list_by_application(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE application_id = $1
             ORDER BY uploaded_at DESC, id DESC"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(application_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a document. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
