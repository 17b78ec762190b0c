pub mod application;
pub mod dashboard;
pub mod document;
pub mod health;
pub mod notification;
pub mod profile;
pub mod program;
pub mod review;
pub mod student;
pub mod university;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /profiles                                 list, create (admin)
/// /profiles/{id}                            get, update (owner or admin)
///
/// /universities                             list, create (admin)
/// /universities/{id}                        update, delete (admin)
///
/// /programs                                 list, create (admin)
/// /programs/{id}                            update, delete (admin)
///
/// /applications                             list (admin), create
/// /applications/{id}                        get, update, delete
/// /applications/{id}/documents              list documents
/// /applications/{id}/reviews                list reviews (admin)
///
/// /students/{student_id}/applications       applications of one student
/// /students/{student_id}/notifications      notifications of one student
///
/// /documents                                create
/// /documents/{id}                           delete
///
/// /reviews                                  list, create (admin)
/// /reviews/{id}                             update (admin)
///
/// /notifications                            create (admin)
/// /notifications/unread-count               unread count (?student_id=)
/// /notifications/{id}                       delete
/// /notifications/{id}/read                  mark read
///
/// /dashboard/stats                          role-scoped counts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/profiles", profile::router())
        .nest("/universities", university::router())
        .nest("/programs", program::router())
        .nest("/applications", application::router())
        .nest("/students", student::router())
        .nest("/documents", document::router())
        .nest("/reviews", review::router())
        .nest("/notifications", notification::router())
        .nest("/dashboard", dashboard::router())
}
