//! Shared query parameter types for API handlers.

use anime_core::error::CoreError;
use anime_core::pagination::PageRequest;
use serde::Deserialize;

/// Pagination parameters (`?page=&size=&sort=property,direction`).
///
/// Missing values fall back to page 0, size 5, sorted by id descending.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl PageParams {
    pub fn to_page_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::from_params(self.page, self.size, self.sort.as_deref())
    }
}

/// `?name=` for exact-name lookups.
#[derive(Debug, Deserialize)]
pub struct NameParams {
    pub name: String,
}
