use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    admissions_db::health_check(&pool).await.unwrap();

    let tables = [
        "profiles",
        "universities",
        "programs",
        "applications",
        "documents",
        "reviews",
        "notifications",
        "idempotency_keys",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Unique constraints follow the `uq_` prefix so violations surface as conflicts.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_are_prefixed(pool: PgPool) {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT conname::text
         FROM pg_constraint c
         JOIN pg_namespace n ON n.oid = c.connamespace
         WHERE c.contype = 'u' AND n.nspname = 'public'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (name,) in &rows {
        assert!(name.starts_with("uq_"), "unique constraint {name} lacks uq_ prefix");
    }
}

/// Every FK is explicitly named `fk_<table>_<column>`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_keys_are_named(pool: PgPool) {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT conname::text
         FROM pg_constraint c
         JOIN pg_namespace n ON n.oid = c.connamespace
         WHERE c.contype = 'f' AND n.nspname = 'public'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows.len(), 7);
    for (name,) in &rows {
        assert!(name.starts_with("fk_"), "foreign key {name} lacks fk_ prefix");
    }
}
