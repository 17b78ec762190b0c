use axum::routing::get;
use axum::Router;

use crate::handlers::{application, notification};
use crate::state::AppState;

/// Student-scoped listings mounted at `/students`.
///
/// ```text
/// GET    /{student_id}/applications      -> application::list_by_student
/// GET    /{student_id}/notifications     -> notification::list_by_student
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{student_id}/applications",
            get(application::list_by_student),
        )
        .route(
            "/{student_id}/notifications",
            get(notification::list_by_student),
        )
}
