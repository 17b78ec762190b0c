//! Handlers for the `/universities` resource.

use admissions_core::error::CoreError;
use admissions_core::types::DbId;
use admissions_db::models::university::{CreateUniversity, University, UpdateUniversity};
use admissions_db::repositories::UniversityRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::idempotency::{self, Begun, Created, IdempotencyKey};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// GET /api/v1/universities
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<University>>> {
    let universities = UniversityRepo::list(&state.pool).await?;
    Ok(Json(universities))
}

/// POST /api/v1/universities
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    key: IdempotencyKey,
    Json(input): Json<CreateUniversity>,
) -> AppResult<Created<University>> {
    input.validate().map_err(CoreError::from)?;

    let scope = idempotency::scope("universities", &admin.context());
    let mut reservation = match key
        .begin(&state.pool, &scope, |id| UniversityRepo::find_by_id(&state.pool, id))
        .await?
    {
        Begun::Replayed(replayed) => return Ok(replayed),
        Begun::Reserved(reservation) => reservation,
    };

    let university = UniversityRepo::create(reservation.conn(), &input).await?;
    reservation.commit(university.id).await?;
    Ok((StatusCode::CREATED, Json(university)))
}

/// PUT /api/v1/universities/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUniversity>,
) -> AppResult<Json<University>> {
    input.validate().map_err(CoreError::from)?;

    let university = UniversityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "University",
            id,
        }))?;
    Ok(Json(university))
}

/// DELETE /api/v1/universities/{id}
///
/// Refused with 409 while programs still belong to the university.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = UniversityRepo::delete(&state.pool, id)
        .await
        .map_err(AppError::DatabaseDelete)?;
    if deleted {
        tracing::info!(university_id = id, "University deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "University",
            id,
        }))
    }
}
