//! Repository for the `idempotency_keys` table.
//!
//! A key is remembered per scope (resource plus caller) together with the id
//! of the row its first request created. The key row is reserved inside the
//! transaction that inserts the resource, so a concurrent insert of the same
//! key waits on the unique index until that transaction ends.

use admissions_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

pub struct IdempotencyRepo;

impl IdempotencyRepo {
    /// Reserve `(scope, key)`, returning the key row id.
    ///
    /// Returns `None` if the key is already taken. Run inside the
    /// transaction that will create the resource.
    pub async fn reserve<'e, E>(
        executor: E,
        scope: &str,
        key: &str,
    ) -> Result<Option<DbId>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: Option<(DbId,)> = sqlx::query_as(
            "INSERT INTO idempotency_keys (scope, key)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_idempotency_keys_scope_key DO NOTHING
             RETURNING id",
        )
        .bind(scope)
        .bind(key)
        .fetch_optional(executor)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Point a reserved key at the resource its request created.
    pub async fn attach<'e, E>(
        executor: E,
        key_id: DbId,
        resource_id: DbId,
    ) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("UPDATE idempotency_keys SET resource_id = $2 WHERE id = $1")
            .bind(key_id)
            .bind(resource_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Resource id recorded for `(scope, key)`, if any.
    pub async fn find(pool: &PgPool, scope: &str, key: &str) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT resource_id FROM idempotency_keys
             WHERE scope = $1 AND key = $2 AND resource_id IS NOT NULL",
        )
        .bind(scope)
        .bind(key)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Forget a key whose resource no longer exists.
    ///
    /// Only removes the row while it still points at `resource_id`.
    pub async fn release(
        pool: &PgPool,
        scope: &str,
        key: &str,
        resource_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM idempotency_keys
             WHERE scope = $1 AND key = $2 AND resource_id = $3",
        )
        .bind(scope)
        .bind(key)
        .bind(resource_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
