//! Handlers for application documents.
//!
//! Access follows the owning application: its student or any admin.

use admissions_core::error::CoreError;
use admissions_core::types::DbId;
use admissions_db::models::document::{CreateDocument, Document};
use admissions_db::repositories::DocumentRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::application::load as load_application;
use crate::idempotency::{self, Begun, Created, IdempotencyKey};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/applications/{application_id}/documents
pub async fn list_by_application(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(application_id): Path<DbId>,
) -> AppResult<Json<Vec<Document>>> {
    let application = load_application(&state.pool, application_id).await?;
    auth.context()
        .require_owner_or_admin(application.student_id)?;

    let documents = DocumentRepo::list_by_application(&state.pool, application_id).await?;
    Ok(Json(documents))
}

/// POST /api/v1/documents
///
/// Records a reference to a file already uploaded to the file store.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    key: IdempotencyKey,
    Json(input): Json<CreateDocument>,
) -> AppResult<Created<Document>> {
    input.validate().map_err(CoreError::from)?;
    let ctx = auth.context();

    let application = load_application(&state.pool, input.application_id).await?;
    ctx.require_owner_or_admin(application.student_id)?;

    let scope = idempotency::scope("documents", &ctx);
    let mut reservation = match key
        .begin(&state.pool, &scope, |id| DocumentRepo::find_by_id(&state.pool, id))
        .await?
    {
        Begun::Replayed(replayed) => return Ok(replayed),
        Begun::Reserved(reservation) => reservation,
    };

    let document = DocumentRepo::create(reservation.conn(), &input).await?;
    reservation.commit(document.id).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// DELETE /api/v1/documents/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let document = DocumentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;
    let application = load_application(&state.pool, document.application_id).await?;
    auth.context()
        .require_owner_or_admin(application.student_id)?;

    let deleted = DocumentRepo::delete(&state.pool, id)
        .await
        .map_err(AppError::DatabaseDelete)?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))
    }
}
