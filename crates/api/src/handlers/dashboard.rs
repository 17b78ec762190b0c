//! Handler for dashboard statistics.

use admissions_core::roles::Role;
use admissions_db::models::dashboard::DashboardStats;
use admissions_db::repositories::DashboardRepo;
use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
///
/// Students get counts over their own rows; admins get system-wide counts.
pub async fn stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = match auth.role {
        Role::Admin => DashboardStats::Admin(DashboardRepo::admin_stats(&state.pool).await?),
        Role::Student => DashboardStats::Student(
            DashboardRepo::student_stats(&state.pool, auth.profile_id).await?,
        ),
    };
    Ok(Json(DataResponse { data: stats }))
}
