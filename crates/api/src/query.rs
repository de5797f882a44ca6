//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page-based pagination parameters (`?page=&limit=`).
///
/// Both absent means "no pagination". Values are clamped in the use-case
/// layer.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn is_requested(&self) -> bool {
        self.page.is_some() || self.limit.is_some()
    }
}
