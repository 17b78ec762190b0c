//! Handlers for student notifications.
//!
//! Students see and manage their own notifications; admins send them and
//! may act on any.

use admissions_core::error::CoreError;
use admissions_core::types::DbId;
use admissions_db::models::notification::{CreateNotification, Notification};
use admissions_db::repositories::NotificationRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::idempotency::{self, Begun, Created, IdempotencyKey};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /notifications/unread-count`.
#[derive(Debug, Deserialize)]
pub struct UnreadCountQuery {
    pub student_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub student_id: DbId,
    pub unread: i64,
}

async fn load(pool: &PgPool, id: DbId) -> AppResult<Notification> {
    NotificationRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/students/{student_id}/notifications
pub async fn list_by_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<Json<Vec<Notification>>> {
    auth.context().require_owner_or_admin(student_id)?;

    let notifications = NotificationRepo::list_by_student(&state.pool, student_id).await?;
    Ok(Json(notifications))
}

/// GET /api/v1/notifications/unread-count?student_id=
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UnreadCountQuery>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    auth.context().require_owner_or_admin(params.student_id)?;

    let unread = NotificationRepo::unread_count(&state.pool, params.student_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCount {
            student_id: params.student_id,
            unread,
        },
    }))
}

/// POST /api/v1/notifications
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    key: IdempotencyKey,
    Json(input): Json<CreateNotification>,
) -> AppResult<Created<Notification>> {
    input.validate().map_err(CoreError::from)?;

    let scope = idempotency::scope("notifications", &admin.context());
    let mut reservation = match key
        .begin(&state.pool, &scope, |id| NotificationRepo::find_by_id(&state.pool, id))
        .await?
    {
        Begun::Replayed(replayed) => return Ok(replayed),
        Begun::Reserved(reservation) => reservation,
    };

    let notification = NotificationRepo::create(reservation.conn(), &input).await?;
    reservation.commit(notification.id).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// POST /api/v1/notifications/{id}/read
///
/// Idempotent: marking an already-read notification returns it unchanged.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Notification>> {
    let existing = load(&state.pool, id).await?;
    auth.context().require_owner_or_admin(existing.student_id)?;

    let notification = NotificationRepo::mark_read(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;
    Ok(Json(notification))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = load(&state.pool, id).await?;
    auth.context().require_owner_or_admin(existing.student_id)?;

    let deleted = NotificationRepo::delete(&state.pool, id)
        .await
        .map_err(AppError::DatabaseDelete)?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))
    }
}
