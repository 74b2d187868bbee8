//! Paginated result envelope.

use serde::{Deserialize, Serialize};

/// One page of a larger ordered result set.
///
/// `page` and `limit` echo the effective (normalised) request values.
/// `total_pages` is never zero, so an empty collection still reports one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}
