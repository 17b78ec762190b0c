//! Repository for the `profiles` table.

use admissions_core::roles::ROLE_STUDENT;
use admissions_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::profile::{CreateProfile, Profile, UpdateProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, full_name, email, phone, role, education, social_links, created_at, updated_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    ///
    /// If `role` is `None` the profile is a student; missing social links
    /// default to an empty object.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateProfile,
    ) -> Result<Profile, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO profiles (full_name, email, phone, role, education, social_links)
             VALUES ($1, $2, $3, COALESCE($4, '{ROLE_STUDENT}'), $5, COALESCE($6, '{{}}'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.role)
            .bind(&input.education)
            .bind(&input.social_links)
            .fetch_one(executor)
            .await
    }

    /// Find a profile by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all profiles, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Profile>(&query).fetch_all(pool).await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                education = COALESCE($5, education),
                social_links = COALESCE($6, social_links)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.education)
            .bind(&input.social_links)
            .fetch_optional(pool)
            .await
    }
}
