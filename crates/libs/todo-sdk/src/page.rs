//! Best effort pagination for listings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;

const MAX_OFFSET: u64 = i64::MAX as u64;

/// Raw query string of a paginated listing.
///
/// Values are kept as strings so that garbage input falls back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageQuery {
    #[serde(rename = "recordPerPage", alias = "recordPerpage")]
    pub record_per_page: Option<String>,
    pub page: Option<String>,
}

/// Clamped pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub page: u64,
    pub per_page: u64,
}

impl PageQuery {
    pub fn resolve(&self) -> Page {
        Page {
            page: positive(self.page.as_deref()).unwrap_or(1),
            per_page: positive(self.record_per_page.as_deref()).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

fn positive(value: Option<&str>) -> Option<u64> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
        .map(|v| v as u64)
}

impl Page {
    /// Number of records before this page.
    ///
    /// Capped at `i64::MAX`, the largest offset a document store accepts, so
    /// a far out page reads as empty instead of failing.
    pub fn skip(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.per_page)
            .min(MAX_OFFSET)
    }
}
