//! Pagination helpers for list endpoints
//!
//! Purely a formatting utility: turns page/limit/sort options into the flat string
//! map the API expects as query parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default page size for list requests
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Sort direction for list requests and local sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9, oldest first)
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first)
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Pagination parameters for API requests.
///
/// # Example
/// ```ignore
/// let params = PaginationParams::new(2, 25)
///     .sort_by("name")
///     .sort_direction(SortDirection::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationParams {
    /// Page number (1-indexed)
    pub page: usize,
    /// Items per page
    pub limit: usize,
    /// Sort field name
    pub sort_by: Option<String>,
    /// Sort order
    pub sort_direction: Option<SortDirection>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_direction: None,
        }
    }
}

impl PaginationParams {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    /// Set the sort field.
    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    /// Set the sort order.
    pub fn sort_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = Some(direction);
        self
    }

    /// Convert to query string parameters.
    ///
    /// `page` and `limit` are always present; `sortBy`/`sortDirection` only when set.
    pub fn to_query_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("page".to_string(), self.page.to_string());
        params.insert("limit".to_string(), self.limit.to_string());

        if let Some(ref field) = self.sort_by {
            params.insert("sortBy".to_string(), field.clone());
        }
        if let Some(direction) = self.sort_direction {
            params.insert("sortDirection".to_string(), direction.as_str().to_string());
        }

        params
    }
}

/// Free-function form of [`PaginationParams::to_query_params`].
pub fn create_pagination_params(
    page: usize,
    limit: usize,
    sort_by: Option<&str>,
    sort_direction: Option<SortDirection>,
) -> BTreeMap<String, String> {
    PaginationParams {
        page,
        limit,
        sort_by: sort_by.map(str::to_string),
        sort_direction,
    }
    .to_query_params()
}
