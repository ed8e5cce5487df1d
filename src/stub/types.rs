//! Query and error types for the stub backend.

use serde::{Deserialize, Serialize};

use crate::source::{DEFAULT_PAGE_SIZE, PageRequest};

/// Paging parameters of `GET /api/v1/assets`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Assets to skip (default 0).
    pub skip: Option<usize>,
    /// Page size (default 100).
    pub limit: Option<usize>,
}

impl From<ListQuery> for PageRequest {
    fn from(q: ListQuery) -> Self {
        Self {
            skip: q.skip.unwrap_or(0),
            limit: q.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub detail: String,
}
