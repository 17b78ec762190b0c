use admissions_core::error::CoreError;
use admissions_core::failure::{classify_database_error, transport_failure, StoreOperation};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
/// `{"error": <message>, "code": <CODE>, "retryable": <bool>}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `admissions_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx, classified when rendered.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database error raised by a DELETE. Foreign-key violations here mean
    /// dependent rows still exist.
    #[error("Database error on delete: {0}")]
    DatabaseDelete(sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Rendered error: status, machine-readable code, message, retry hint.
type Rendered = (StatusCode, &'static str, String, bool);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, retryable) = match &self {
            AppError::Core(core) => render_core(core),
            AppError::Database(err) => classify_sqlx_error(err, StoreOperation::Write),
            AppError::DatabaseDelete(err) => classify_sqlx_error(err, StoreOperation::Delete),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), false)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
            "retryable": retryable,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn render_core(core: &CoreError) -> Rendered {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
            false,
        ),
        CoreError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            msg.clone(),
            false,
        ),
        CoreError::ReferentialIntegrity(msg) => (
            StatusCode::CONFLICT,
            "REFERENTIAL_INTEGRITY",
            msg.clone(),
            false,
        ),
        CoreError::Persistence {
            message,
            transient: true,
        } => (
            StatusCode::SERVICE_UNAVAILABLE,
            "PERSISTENCE_ERROR",
            message.clone(),
            true,
        ),
        CoreError::Persistence {
            message,
            transient: false,
        } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "PERSISTENCE_ERROR",
            message.clone(),
            false,
        ),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone(), false),
        CoreError::Unauthorized(msg) => {
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), false)
        }
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), false),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Server-reported errors are classified by SQLSTATE and by whether a
///   DELETE raised them (see `admissions_core::failure`).
/// - Pool exhaustion and transport failures map to a retryable 503.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error, operation: StoreOperation) -> Rendered {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            false,
        ),
        sqlx::Error::Database(db_err) => {
            let classified =
                classify_database_error(operation, db_err.code().as_deref(), db_err.constraint());
            if matches!(classified, CoreError::Internal(_)) {
                tracing::error!(error = %db_err, "Unclassified database error");
                return internal();
            }
            tracing::debug!(error = %db_err, kind = ?classified.kind(), "Database error classified");
            render_core(&classified)
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => {
            tracing::warn!(error = %err, "Data store unreachable");
            render_core(&transport_failure())
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

fn internal() -> Rendered {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
        false,
    )
}
