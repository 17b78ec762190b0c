//! Handlers for the `/applications` resource and the student-scoped
//! `/students/{student_id}/applications` listing.

use admissions_core::access::{check_application_create, check_application_update, ApplicationChange};
use admissions_core::error::CoreError;
use admissions_core::types::DbId;
use admissions_db::models::application::{
    Application, ApplicationWithRelations, CreateApplication, UpdateApplication,
};
use admissions_db::repositories::ApplicationRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::idempotency::{self, Begun, Created, IdempotencyKey};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Load an application or fail with 404.
pub(crate) async fn load(pool: &PgPool, id: DbId) -> AppResult<Application> {
    ApplicationRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))
}

/// GET /api/v1/applications
pub async fn list_all(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ApplicationWithRelations>>> {
    let applications = ApplicationRepo::list_all(&state.pool).await?;
    Ok(Json(applications))
}

/// GET /api/v1/students/{student_id}/applications
pub async fn list_by_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<Json<Vec<ApplicationWithRelations>>> {
    auth.context().require_owner_or_admin(student_id)?;

    let applications = ApplicationRepo::list_by_student(&state.pool, student_id).await?;
    Ok(Json(applications))
}

/// GET /api/v1/applications/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApplicationWithRelations>> {
    let application = ApplicationRepo::find_with_relations(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))?;
    auth.context()
        .require_owner_or_admin(application.application.student_id)?;
    Ok(Json(application))
}

/// POST /api/v1/applications
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    key: IdempotencyKey,
    Json(input): Json<CreateApplication>,
) -> AppResult<Created<Application>> {
    input.validate().map_err(CoreError::from)?;
    let ctx = auth.context();
    check_application_create(&ctx, input.student_id, input.status.as_deref())?;

    let scope = idempotency::scope("applications", &ctx);
    let mut reservation = match key
        .begin(&state.pool, &scope, |id| ApplicationRepo::find_by_id(&state.pool, id))
        .await?
    {
        Begun::Replayed(replayed) => return Ok(replayed),
        Begun::Reserved(reservation) => reservation,
    };

    let application = ApplicationRepo::create(reservation.conn(), &input).await?;
    reservation.commit(application.id).await?;

    tracing::info!(
        application_id = application.id,
        student_id = application.student_id,
        program_id = application.program_id,
        "Application submitted",
    );
    Ok((StatusCode::CREATED, Json(application)))
}

/// PUT /api/v1/applications/{id}
///
/// Students may move their application to another program; admins may only
/// change its status.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateApplication>,
) -> AppResult<Json<Application>> {
    input.validate().map_err(CoreError::from)?;

    let existing = load(&state.pool, id).await?;
    // Clients re-send the whole form; only fields that differ count.
    let change = ApplicationChange {
        program: input.program_id.is_some_and(|p| p != existing.program_id),
        status: input
            .status
            .as_deref()
            .is_some_and(|s| s != existing.status),
    };
    check_application_update(&auth.context(), existing.student_id, change)?;

    let application = ApplicationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))?;
    Ok(Json(application))
}

/// DELETE /api/v1/applications/{id}
///
/// Documents and reviews of the application are removed with it.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = load(&state.pool, id).await?;
    auth.context().require_owner_or_admin(existing.student_id)?;

    let deleted = ApplicationRepo::delete(&state.pool, id)
        .await
        .map_err(AppError::DatabaseDelete)?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))
    }
}
