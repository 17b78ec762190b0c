//! Handlers for the `/profiles` resource.
//!
//! Profiles are provisioned by administrators; everyone may read and edit
//! their own profile.

use admissions_core::error::CoreError;
use admissions_core::types::DbId;
use admissions_db::models::profile::{CreateProfile, Profile, UpdateProfile};
use admissions_db::repositories::ProfileRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::idempotency::{self, Begun, Created, IdempotencyKey};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/profiles
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Profile>>> {
    let profiles = ProfileRepo::list(&state.pool).await?;
    Ok(Json(profiles))
}

/// POST /api/v1/profiles
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    key: IdempotencyKey,
    Json(input): Json<CreateProfile>,
) -> AppResult<Created<Profile>> {
    input.validate().map_err(CoreError::from)?;

    let scope = idempotency::scope("profiles", &admin.context());
    let mut reservation = match key
        .begin(&state.pool, &scope, |id| ProfileRepo::find_by_id(&state.pool, id))
        .await?
    {
        Begun::Replayed(replayed) => return Ok(replayed),
        Begun::Reserved(reservation) => reservation,
    };

    let profile = ProfileRepo::create(reservation.conn(), &input).await?;
    reservation.commit(profile.id).await?;

    tracing::info!(profile_id = profile.id, role = %profile.role, "Profile created");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/v1/profiles/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Profile>> {
    auth.context().require_owner_or_admin(id)?;

    let profile = ProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))?;
    Ok(Json(profile))
}

/// PUT /api/v1/profiles/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<Profile>> {
    input.validate().map_err(CoreError::from)?;
    auth.context().require_owner_or_admin(id)?;

    let profile = ProfileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))?;
    Ok(Json(profile))
}
