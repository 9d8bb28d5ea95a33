//! Search parameter and result types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default page size for patient search.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Parameters for a paginated patient search.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Free-text term matched against name, patientId and contact phone.
    /// `None` matches every record.
    pub search: Option<String>,

    /// 1-based page number.
    pub page: u64,

    /// Page size.
    pub limit: u64,

    /// Field to sort by; a leading `-` reverses the order.
    pub sort: String,

    /// Field-level projection pushed to the query. `None` returns full
    /// records; `Some(fields)` restricts every hit to the named top-level
    /// fields at the storage layer, not after the fetch.
    pub projection: Option<&'static [&'static str]>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            sort: "name".to_string(),
            projection: None,
        }
    }
}

impl SearchParams {
    /// Returns the number of records to skip for the requested page.
    #[must_use]
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Returns the sort field and direction, normalizing a `-` prefix.
    #[must_use]
    pub fn sort_key(&self) -> (&str, bool) {
        match self.sort.strip_prefix('-') {
            Some(field) => (field, true),
            None => (self.sort.as_str(), false),
        }
    }
}

/// One page of search hits.
///
/// Hits are JSON documents because the projection may have stripped them
/// down to a field subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total number of matching records across all pages.
    pub total: u64,

    /// The page that was returned.
    pub page: u64,

    /// The records on this page.
    pub patients: Vec<Value>,
}
