use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
///
/// ```text
/// GET    /          -> list (admin)
/// POST   /          -> create (admin)
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::list).post(profile::create))
        .route("/{id}", get(profile::get_by_id).put(profile::update))
}
