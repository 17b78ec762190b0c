//! `Idempotency-Key` support for create endpoints.
//!
//! A client may send `Idempotency-Key: <opaque string>` with any create. The
//! key is reserved in the same transaction that inserts the record, so
//! concurrent requests with one key produce a single row: the others wait on
//! the unique index until the first commits, then return that record with
//! `200 OK`. A create that fails rolls its reservation back.

use std::future::Future;

use admissions_core::access::CallerContext;
use admissions_core::error::CoreError;
use admissions_core::types::DbId;
use admissions_db::repositories::IdempotencyRepo;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::error::{AppError, AppResult};

pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Longest accepted key.
pub const MAX_KEY_LEN: usize = 255;

/// Reservation attempts before giving up on a key whose record keeps vanishing.
const MAX_ATTEMPTS: usize = 2;

/// Optional idempotency key taken from the request headers.
#[derive(Debug, Clone, Default)]
pub struct IdempotencyKey(pub Option<String>);

impl<S> FromRequestParts<S> for IdempotencyKey
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(IDEMPOTENCY_KEY_HEADER) else {
            return Ok(IdempotencyKey(None));
        };
        let key = value
            .to_str()
            .map_err(|_| AppError::BadRequest("Idempotency-Key must be visible ASCII".into()))?
            .trim();
        if key.is_empty() || key.len() > MAX_KEY_LEN {
            return Err(AppError::BadRequest(format!(
                "Idempotency-Key must be 1-{MAX_KEY_LEN} characters"
            )));
        }
        Ok(IdempotencyKey(Some(key.to_string())))
    }
}

/// Keys are scoped per resource and caller so two callers never collide.
pub fn scope(resource: &str, ctx: &CallerContext) -> String {
    format!("{resource}:{}", ctx.profile_id)
}

/// Response of a create endpoint: `201` on insert, `200` on replay.
pub type Created<T> = (StatusCode, Json<T>);

/// Result of [`IdempotencyKey::begin`].
pub enum Begun<T> {
    /// An earlier request with this key already created the record.
    Replayed(Created<T>),
    /// This request owns the key (or sent none) and must create the record
    /// through the reservation.
    Reserved(Reservation),
}

/// Open transaction holding the key reservation. Dropping it without
/// [`Reservation::commit`] rolls back both the key and anything written
/// through [`Reservation::conn`].
pub struct Reservation {
    tx: Transaction<'static, Postgres>,
    key_id: Option<DbId>,
}

impl Reservation {
    /// Connection to run the insert on.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// The underlying transaction, for repositories that take one.
    pub fn tx(&mut self) -> &mut Transaction<'static, Postgres> {
        &mut self.tx
    }

    /// Point the key at the created record and commit.
    pub async fn commit(mut self, resource_id: DbId) -> AppResult<()> {
        if let Some(key_id) = self.key_id {
            IdempotencyRepo::attach(&mut *self.tx, key_id, resource_id).await?;
        }
        self.tx.commit().await?;
        Ok(())
    }
}

impl IdempotencyKey {
    /// Reserve the key for this request or replay the record it produced.
    ///
    /// `load` fetches a recorded row by id. If that row has since been
    /// deleted the key is released and reserved again for this request.
    pub async fn begin<T, F, Fut>(
        &self,
        pool: &PgPool,
        scope: &str,
        load: F,
    ) -> AppResult<Begun<T>>
    where
        T: Serialize,
        F: Fn(DbId) -> Fut,
        Fut: Future<Output = Result<Option<T>, sqlx::Error>>,
    {
        let Some(key) = self.0.as_deref() else {
            let tx = pool.begin().await?;
            return Ok(Begun::Reserved(Reservation { tx, key_id: None }));
        };

        for _ in 0..MAX_ATTEMPTS {
            let mut tx = pool.begin().await?;
            // Blocks while another open transaction holds the same key.
            if let Some(key_id) = IdempotencyRepo::reserve(&mut *tx, scope, key).await? {
                return Ok(Begun::Reserved(Reservation {
                    tx,
                    key_id: Some(key_id),
                }));
            }
            tx.rollback().await?;

            let Some(id) = IdempotencyRepo::find(pool, scope, key).await? else {
                continue;
            };
            if let Some(row) = load(id).await? {
                tracing::debug!(scope, key, id, "Replaying idempotent create");
                return Ok(Begun::Replayed((StatusCode::OK, Json(row))));
            }
            IdempotencyRepo::release(pool, scope, key, id).await?;
            tracing::debug!(scope, key, id, "Released idempotency key of a deleted record");
        }

        tracing::warn!(scope, key, "Idempotency key could not be reserved");
        Err(AppError::Core(CoreError::Conflict(
            "Idempotency key is in use by a concurrent request".into(),
        )))
    }
}
