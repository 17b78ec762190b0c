use axum::routing::{get, put};
use axum::Router;

use crate::handlers::program;
use crate::state::AppState;

/// Routes mounted at `/programs`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create (admin)
/// PUT    /{id}      -> update (admin)
/// DELETE /{id}      -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(program::list).post(program::create))
        .route("/{id}", put(program::update).delete(program::delete))
}
