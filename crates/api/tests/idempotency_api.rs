//! `Idempotency-Key` behaviour on create endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_json_auth, post_json_idempotent, seed_admin,
    seed_student,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeated_key_returns_original(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;
    let (sid, student) = seed_student(&pool, "sam@example.com").await;
    let program_id = common::seed_program(&pool, &admin).await;
    let body = json!({ "student_id": sid, "program_id": program_id });

    let first = post_json_idempotent(
        common::build_test_app(pool.clone()),
        "/api/v1/applications",
        &student,
        "submit-1",
        body.clone(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = body_json(first).await;

    let second = post_json_idempotent(
        common::build_test_app(pool.clone()),
        "/api/v1/applications",
        &student,
        "submit-1",
        body,
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await;
    assert_eq!(first["id"], second["id"]);

    let mine = body_json(
        get_auth(
            common::build_test_app(pool),
            &format!("/api/v1/students/{sid}/applications"),
            &student,
        )
        .await,
    )
    .await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_distinct_keys_create_distinct_rows(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;

    let mut ids = Vec::new();
    for key in ["uni-a", "uni-b"] {
        let response = post_json_idempotent(
            common::build_test_app(pool.clone()),
            "/api/v1/universities",
            &admin,
            key,
            json!({ "name": "Same Name U" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        ids.push(body_json(response).await["id"].as_i64().unwrap());
    }
    assert_ne!(ids[0], ids[1]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_without_key_every_create_inserts(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;

    for _ in 0..2 {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/universities",
            &admin,
            json!({ "name": "Twin U" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let all = body_json(
        get_auth(common::build_test_app(pool), "/api/v1/universities", &admin).await,
    )
    .await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_requests_with_one_key_create_one_row(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = common::build_test_app(pool.clone());
        let token = admin.clone();
        handles.push(tokio::spawn(async move {
            let response = post_json_idempotent(
                app,
                "/api/v1/universities",
                &token,
                "same-key",
                json!({ "name": "Race U" }),
            )
            .await;
            let status = response.status();
            (status, body_json(response).await["id"].as_i64())
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    let created = results
        .iter()
        .filter(|(status, _)| *status == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1, "{results:?}");
    assert!(results
        .iter()
        .all(|(status, _)| *status == StatusCode::CREATED || *status == StatusCode::OK));
    let first_id = results[0].1.expect("id in body");
    assert!(results.iter().all(|(_, id)| *id == Some(first_id)));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM universities")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_create_does_not_consume_key(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;

    let rejected = post_json_idempotent(
        common::build_test_app(pool.clone()),
        "/api/v1/programs",
        &admin,
        "program-1",
        json!({ "name": "CS", "university_id": 999_999 }),
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let university = body_json(
        post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/universities",
            &admin,
            json!({ "name": "TEST U" }),
        )
        .await,
    )
    .await;

    let retried = post_json_idempotent(
        common::build_test_app(pool.clone()),
        "/api/v1/programs",
        &admin,
        "program-1",
        json!({ "name": "CS", "university_id": university["id"] }),
    )
    .await;
    assert_eq!(retried.status(), StatusCode::CREATED);

    let (keys,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM idempotency_keys")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(keys, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_key_of_deleted_record_creates_again(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;

    let first = body_json(
        post_json_idempotent(
            common::build_test_app(pool.clone()),
            "/api/v1/universities",
            &admin,
            "uni-1",
            json!({ "name": "Gone U" }),
        )
        .await,
    )
    .await;
    let deleted = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/universities/{}", first["id"]),
        &admin,
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = post_json_idempotent(
        common::build_test_app(pool),
        "/api/v1/universities",
        &admin,
        "uni-1",
        json!({ "name": "Gone U" }),
    )
    .await;
    assert_eq!(again.status(), StatusCode::CREATED);
    assert_ne!(body_json(again).await["id"], first["id"]);
}
