//! Shared response envelope types for API handlers.
//!
//! Entity endpoints return the entity itself. Computed payloads (counts,
//! statistics) are wrapped in [`DataResponse`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
