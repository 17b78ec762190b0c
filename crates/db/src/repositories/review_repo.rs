//! Repository for the `reviews` table.
//!
//! Recording a review normally also moves the reviewed application to the
//! review's status. [`ReviewRepo::create_and_sync_status`] and
//! [`ReviewRepo::update_and_sync_status`] do both writes in one transaction;
//! the plain `create`/`update` methods write the review row only.

use admissions_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::review::{CreateReview, Review, ReviewWithRelations, UpdateReview};
use crate::relations::{Expansion, JoinedRead};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, application_id, reviewer_id, status, comments, reviewed_at";

const REVIEWER: Expansion = Expansion {
    key: "reviewer",
    table: "profiles",
    alias: "rv",
    foreign_key: "reviewer_id",
    columns: &["id", "full_name"],
    nested: &[],
};

/// Reviews of one application, with the reviewer's name.
const FOR_APPLICATION: JoinedRead = JoinedRead {
    table: "reviews",
    alias: "r",
    columns: COLUMNS,
    expansions: &[REVIEWER],
};

/// Every review, with the application (applicant and program) and reviewer.
const FOR_ADMIN: JoinedRead = JoinedRead {
    table: "reviews",
    alias: "r",
    columns: COLUMNS,
    expansions: &[
        Expansion {
            key: "application",
            table: "applications",
            alias: "a",
            foreign_key: "application_id",
            columns: &["id", "status"],
            nested: &[
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
                    nested: &[],
                },
            ],
        },
        REVIEWER,
    ],
};

/// Provides data access for application reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Find a review by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reviews of one application with reviewer names, newest first.
    pub async fn list_by_application(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<Vec<ReviewWithRelations>, sqlx::Error> {
        let query = format!(
            "{} WHERE r.application_id = $1 ORDER BY r.reviewed_at DESC, r.id DESC",
            FOR_APPLICATION.select_sql()
        );
        sqlx::query_as::<_, ReviewWithRelations>(&query)
            .bind(application_id)
            .fetch_all(pool)
            .await
    }

    /// List every review with application and reviewer, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ReviewWithRelations>, sqlx::Error> {
        let query = format!(
            "{} ORDER BY r.reviewed_at DESC, r.id DESC",
            FOR_ADMIN.select_sql()
        );
        sqlx::query_as::<_, ReviewWithRelations>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert a review without touching the application.
    pub async fn create(
        pool: &PgPool,
        reviewer_id: DbId,
        input: &CreateReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (application_id, reviewer_id, status, comments)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.application_id)
            .bind(reviewer_id)
            .bind(&input.status)
            .bind(&input.comments)
            .fetch_one(pool)
            .await
    }

    /// Update a review without touching the application. The editing admin
    /// becomes the reviewer and `reviewed_at` is refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = update_query();
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(reviewer_id)
            .bind(&input.status)
            .bind(&input.comments)
            .fetch_optional(pool)
            .await
    }

    /// Insert a review and set the application's status to match, atomically.
    ///
    /// Returns `None` (and writes nothing) if the application does not exist.
    pub async fn create_and_sync_status(
        pool: &PgPool,
        reviewer_id: DbId,
        input: &CreateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let review = Self::create_and_sync_status_in(&mut tx, reviewer_id, input).await?;
        match review {
            Some(_) => tx.commit().await?,
            None => tx.rollback().await?,
        }
        Ok(review)
    }

    /// [`ReviewRepo::create_and_sync_status`] inside a transaction the caller
    /// owns. Nothing is written when this returns `None`; committing is left
    /// to the caller.
    pub async fn create_and_sync_status_in(
        tx: &mut Transaction<'_, Postgres>,
        reviewer_id: DbId,
        input: &CreateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let exists: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM applications WHERE id = $1 FOR UPDATE")
                .bind(input.application_id)
                .fetch_optional(&mut **tx)
                .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO reviews (application_id, reviewer_id, status, comments)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, Review>(&query)
            .bind(input.application_id)
            .bind(reviewer_id)
            .bind(&input.status)
            .bind(&input.comments)
            .fetch_one(&mut **tx)
            .await?;

        sync_application_status(tx, &review).await?;

        tracing::debug!(
            review_id = review.id,
            application_id = review.application_id,
            status = %review.status,
            "Review recorded and application status synced",
        );
        Ok(Some(review))
    }

    /// Update a review and set its application's status to the review's
    /// resulting status, atomically.
    ///
    /// Returns `None` (and writes nothing) if the review does not exist.
    pub async fn update_and_sync_status(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = update_query();
        let review = sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(reviewer_id)
            .bind(&input.status)
            .bind(&input.comments)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(review) = review else {
            tx.rollback().await?;
            return Ok(None);
        };

        sync_application_status(&mut tx, &review).await?;
        tx.commit().await?;
        Ok(Some(review))
    }
}

fn update_query() -> String {
    format!(
        "UPDATE reviews SET
            reviewer_id = $2,
            status = COALESCE($3, status),
            comments = COALESCE($4, comments),
            reviewed_at = NOW()
         WHERE id = $1
         RETURNING {COLUMNS}"
    )
}

/// Copy the review's status onto its application inside `tx`.
async fn sync_application_status(
    tx: &mut Transaction<'_, Postgres>,
    review: &Review,
) -> Result<(), sqlx::Error> {
    let result = sqlx::query("UPDATE applications SET status = $2 WHERE id = $1")
        .bind(review.application_id)
        .bind(&review.status)
        .execute(&mut **tx)
        .await?;
    if result.rows_affected() == 0 {
        // The application row is locked or cascades with the review, so this
        // only happens if it vanished mid-transaction.
        return Err(sqlx::Error::RowNotFound);
    }
    Ok(())
}
