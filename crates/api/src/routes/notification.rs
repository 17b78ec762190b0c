use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// POST   /                  -> create (admin)
/// GET    /unread-count      -> unread_count (?student_id=)
/// POST   /{id}/read         -> mark_read
/// DELETE /{id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(notification::create))
        .route("/unread-count", get(notification::unread_count))
        .route("/{id}", delete(notification::delete))
        .route("/{id}/read", post(notification::mark_read))
}
