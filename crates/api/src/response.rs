//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Endpoints that also
//! report aggregates add a sibling `"meta"` object via [`DataWithMeta`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "meta": M }` envelope.
#[derive(Debug, Serialize)]
pub struct DataWithMeta<T: Serialize, M: Serialize> {
    pub data: T,
    pub meta: M,
}
