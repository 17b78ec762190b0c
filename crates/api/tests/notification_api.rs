//! HTTP-level tests for notifications and dashboard statistics.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_auth, post_json_auth, seed_admin, seed_student};
use serde_json::json;
use sqlx::PgPool;

async fn notify(pool: &PgPool, admin: &str, student_id: i64, message: &str) -> i64 {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/notifications",
        admin,
        json!({ "student_id": student_id, "message": message }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_read_twice_succeeds(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;
    let (sid, student) = seed_student(&pool, "sam@example.com").await;
    let id = notify(&pool, &admin, sid, "Your application was received").await;

    for _ in 0..2 {
        let response = post_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/notifications/{id}/read"),
            &student,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["read_status"], true);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unread_count_and_listing(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;
    let (sid, student) = seed_student(&pool, "sam@example.com").await;
    let first = notify(&pool, &admin, sid, "first").await;
    notify(&pool, &admin, sid, "second").await;

    let json = body_json(
        get_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/notifications/unread-count?student_id={sid}"),
            &student,
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["unread"], 2);

    post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notifications/{first}/read"),
        &student,
    )
    .await;

    let json = body_json(
        get_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/notifications/unread-count?student_id={sid}"),
            &student,
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["unread"], 1);

    let list = body_json(
        get_auth(
            common::build_test_app(pool),
            &format!("/api/v1/students/{sid}/notifications"),
            &student,
        )
        .await,
    )
    .await;
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["message"], "second");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_notification(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;
    let (sid, student) = seed_student(&pool, "sam@example.com").await;
    let id = notify(&pool, &admin, sid, "bye").await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notifications/{id}"),
        &student,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_auth(
        common::build_test_app(pool),
        &format!("/api/v1/notifications/{id}/read"),
        &student,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_message_is_rejected(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;
    let (sid, _) = seed_student(&pool, "sam@example.com").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/notifications",
        &admin,
        json!({ "student_id": sid, "message": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_is_role_scoped(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;
    let (sid, student) = seed_student(&pool, "sam@example.com").await;
    let program_id = common::seed_program(&pool, &admin).await;
    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/applications",
        &student,
        json!({ "student_id": sid, "program_id": program_id }),
    )
    .await;
    notify(&pool, &admin, sid, "hello").await;

    let mine = body_json(
        get_auth(common::build_test_app(pool.clone()), "/api/v1/dashboard/stats", &student).await,
    )
    .await;
    assert_eq!(mine["data"]["scope"], "student");
    assert_eq!(mine["data"]["applications"], 1);
    assert_eq!(mine["data"]["documents"], 0);
    assert_eq!(mine["data"]["unread_notifications"], 1);

    let global = body_json(
        get_auth(common::build_test_app(pool), "/api/v1/dashboard/stats", &admin).await,
    )
    .await;
    assert_eq!(global["data"]["scope"], "admin");
    assert_eq!(global["data"]["applications"], 1);
    assert_eq!(global["data"]["programs"], 1);
    assert_eq!(global["data"]["universities"], 1);
    assert_eq!(global["data"]["users"], 1);
}
