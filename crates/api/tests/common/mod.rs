#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use admissions_api::auth::jwt::{generate_access_token, JwtConfig};
use admissions_api::config::ServerConfig;
use admissions_api::router::build_app_router;
use admissions_api::state::AppState;
use admissions_db::models::profile::CreateProfile;
use admissions_db::repositories::ProfileRepo;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Callers
// ---------------------------------------------------------------------------

/// Bearer token for the given profile, signed with the test secret.
pub fn token_for(profile_id: i64, role: &str) -> String {
    generate_access_token(profile_id, role, &test_config().jwt).expect("token should sign")
}

/// Insert a profile and return `(id, bearer token)`.
pub async fn seed_caller(pool: &PgPool, email: &str, role: &str) -> (i64, String) {
    let profile = ProfileRepo::create(
        pool,
        &CreateProfile {
            full_name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            phone: None,
            role: Some(role.to_string()),
            education: None,
            social_links: None,
        },
    )
    .await
    .expect("profile creation should succeed");
    (profile.id, token_for(profile.id, role))
}

pub async fn seed_admin(pool: &PgPool) -> (i64, String) {
    seed_caller(pool, "admin@example.com", "admin").await
}

pub async fn seed_student(pool: &PgPool, email: &str) -> (i64, String) {
    seed_caller(pool, email, "student").await
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    headers: &[(&str, &str)],
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, &[], None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), &[], None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, &[], Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), &[], Some(body)).await
}

/// POST with an `Idempotency-Key` header.
pub async fn post_json_idempotent(
    app: Router,
    uri: &str,
    token: &str,
    key: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Some(token),
        &[("idempotency-key", key)],
        Some(body),
    )
    .await
}

/// POST with no body (e.g. mark-read).
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), &[], None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), &[], Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), &[], None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Catalogue fixtures
// ---------------------------------------------------------------------------

/// Create university "TEST U" with program "CS" through the API and return
/// the program id.
pub async fn seed_program(pool: &PgPool, admin_token: &str) -> i64 {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/universities",
        admin_token,
        serde_json::json!({ "name": "TEST U", "location": "Springfield" }),
    )
    .await;
    assert_eq!(response.status(), 201);
    let university = body_json(response).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/programs",
        admin_token,
        serde_json::json!({ "name": "CS", "university_id": university["id"] }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["id"].as_i64().unwrap()
}
