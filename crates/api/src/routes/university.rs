use axum::routing::{get, put};
use axum::Router;

use crate::handlers::university;
use crate::state::AppState;

/// Routes mounted at `/universities`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create (admin)
/// PUT    /{id}      -> update (admin)
/// DELETE /{id}      -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(university::list).post(university::create))
        .route("/{id}", put(university::update).delete(university::delete))
}
