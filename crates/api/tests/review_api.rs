//! HTTP-level tests for reviews and the application status they set.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, put_json_auth, seed_admin, seed_student};
use serde_json::json;
use sqlx::PgPool;

/// Seed an admin, a student and one pending application.
/// Returns `(admin_id, admin_token, student_token, application_id)`.
async fn setup(pool: &PgPool) -> (i64, String, String, i64) {
    let (admin_id, admin) = seed_admin(pool).await;
    let (sid, student) = seed_student(pool, "sam@example.com").await;
    let program_id = common::seed_program(pool, &admin).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/applications",
        &student,
        json!({ "student_id": sid, "program_id": program_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let application_id = body_json(response).await["id"].as_i64().unwrap();

    (admin_id, admin, student, application_id)
}

async fn application_status(pool: &PgPool, token: &str, id: i64) -> String {
    let json = body_json(
        get_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/applications/{id}"),
            token,
        )
        .await,
    )
    .await;
    json["status"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_approves_application(pool: PgPool) {
    let (admin_id, admin, student, application_id) = setup(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/reviews",
        &admin,
        json!({ "application_id": application_id, "status": "approved", "comments": "Great fit" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let review = body_json(response).await;
    assert_eq!(review["reviewer_id"], admin_id);

    assert_eq!(application_status(&pool, &student, application_id).await, "approved");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_update_moves_application(pool: PgPool) {
    let (_, admin, student, application_id) = setup(&pool).await;

    let review = body_json(
        post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/reviews",
            &admin,
            json!({ "application_id": application_id, "status": "under_review" }),
        )
        .await,
    )
    .await;
    let review_id = review["id"].as_i64().unwrap();

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/reviews/{review_id}"),
        &admin,
        json!({ "status": "rejected", "comments": "Missing prerequisites" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "rejected");

    assert_eq!(application_status(&pool, &student, application_id).await, "rejected");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_of_unknown_application_is_404(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/reviews",
        &admin,
        json!({ "application_id": 999_999, "status": "approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Application with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_listings(pool: PgPool) {
    let (_, admin, _, application_id) = setup(&pool).await;
    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/reviews",
        &admin,
        json!({ "application_id": application_id, "status": "under_review" }),
    )
    .await;

    let by_app = body_json(
        get_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/applications/{application_id}/reviews"),
            &admin,
        )
        .await,
    )
    .await;
    assert_eq!(by_app[0]["reviewer"]["full_name"], "admin");

    let all = body_json(get_auth(common::build_test_app(pool), "/api/v1/reviews", &admin).await).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["application"]["student"]["email"], "sam@example.com");
    assert_eq!(all[0]["application"]["program"]["name"], "CS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_students_cannot_review(pool: PgPool) {
    let (_, _, student, application_id) = setup(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/reviews",
        &student,
        json!({ "application_id": application_id, "status": "approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(application_status(&pool, &student, application_id).await, "pending");
}
