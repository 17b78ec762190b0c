//! Handlers for the `/programs` resource.

use admissions_core::error::CoreError;
use admissions_core::types::DbId;
use admissions_db::models::program::{
    CreateProgram, Program, ProgramWithUniversity, UpdateProgram,
};
use admissions_db::repositories::ProgramRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::idempotency::{self, Begun, Created, IdempotencyKey};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// GET /api/v1/programs
///
/// Each program carries its university.
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProgramWithUniversity>>> {
    let programs = ProgramRepo::list(&state.pool).await?;
    Ok(Json(programs))
}

/// POST /api/v1/programs
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    key: IdempotencyKey,
    Json(input): Json<CreateProgram>,
) -> AppResult<Created<Program>> {
    input.validate().map_err(CoreError::from)?;

    let scope = idempotency::scope("programs", &admin.context());
    let mut reservation = match key
        .begin(&state.pool, &scope, |id| ProgramRepo::find_by_id(&state.pool, id))
        .await?
    {
        Begun::Replayed(replayed) => return Ok(replayed),
        Begun::Reserved(reservation) => reservation,
    };

    let program = ProgramRepo::create(reservation.conn(), &input).await?;
    reservation.commit(program.id).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

/// PUT /api/v1/programs/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProgram>,
) -> AppResult<Json<Program>> {
    input.validate().map_err(CoreError::from)?;

    let program = ProgramRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))?;
    Ok(Json(program))
}

/// DELETE /api/v1/programs/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProgramRepo::delete(&state.pool, id)
        .await
        .map_err(AppError::DatabaseDelete)?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))
    }
}
