//! Route definitions for the `/applications` resource.
//!
//! Also nests the per-application document and review listings.

use axum::routing::get;
use axum::Router;

use crate::handlers::{application, document, review};
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET    /                       -> list_all (admin)
/// POST   /                       -> create
/// GET    /{id}                   -> get_by_id
/// PUT    /{id}                   -> update
/// DELETE /{id}                   -> delete
///
/// GET    /{id}/documents         -> document::list_by_application
/// GET    /{id}/reviews           -> review::list_by_application (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(application::list_all).post(application::create))
        .route(
            "/{id}",
            get(application::get_by_id)
                .put(application::update)
                .delete(application::delete),
        )
        .route("/{id}/documents", get(document::list_by_application))
        .route("/{id}/reviews", get(review::list_by_application))
}
