//! Handlers for the `/reviews` resource. Admin only.
//!
//! Creating or editing a review also moves the reviewed application to the
//! review's status, in the same transaction. The calling admin is recorded
//! as the reviewer.

use admissions_core::error::CoreError;
use admissions_core::types::DbId;
use admissions_db::models::review::{CreateReview, Review, ReviewWithRelations, UpdateReview};
use admissions_db::repositories::ReviewRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::idempotency::{self, Begun, Created, IdempotencyKey};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/reviews
pub async fn list_all(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReviewWithRelations>>> {
    let reviews = ReviewRepo::list_all(&state.pool).await?;
    Ok(Json(reviews))
}

/// GET /api/v1/applications/{application_id}/reviews
pub async fn list_by_application(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(application_id): Path<DbId>,
) -> AppResult<Json<Vec<ReviewWithRelations>>> {
    let reviews = ReviewRepo::list_by_application(&state.pool, application_id).await?;
    Ok(Json(reviews))
}

/// POST /api/v1/reviews
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    key: IdempotencyKey,
    Json(input): Json<CreateReview>,
) -> AppResult<Created<Review>> {
    input.validate().map_err(CoreError::from)?;

    let scope = idempotency::scope("reviews", &admin.context());
    let mut reservation = match key
        .begin(&state.pool, &scope, |id| ReviewRepo::find_by_id(&state.pool, id))
        .await?
    {
        Begun::Replayed(replayed) => return Ok(replayed),
        Begun::Reserved(reservation) => reservation,
    };

    let review =
        ReviewRepo::create_and_sync_status_in(reservation.tx(), admin.profile_id, &input)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Application",
                id: input.application_id,
            }))?;
    reservation.commit(review.id).await?;

    tracing::info!(
        review_id = review.id,
        application_id = review.application_id,
        reviewer_id = review.reviewer_id,
        status = %review.status,
        "Review recorded",
    );
    Ok((StatusCode::CREATED, Json(review)))
}

/// PUT /api/v1/reviews/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReview>,
) -> AppResult<Json<Review>> {
    input.validate().map_err(CoreError::from)?;

    let review = ReviewRepo::update_and_sync_status(&state.pool, id, admin.profile_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;
    Ok(Json(review))
}
