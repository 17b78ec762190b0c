use axum::routing::{get, put};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/reviews` (admin only).
///
/// ```text
/// GET    /          -> list_all
/// POST   /          -> create
/// PUT    /{id}      -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(review::list_all).post(review::create))
        .route("/{id}", put(review::update))
}
