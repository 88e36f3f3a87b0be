//! Page requests and paged results.
//!
//! A [`PageRequest`] is always normalized: page is non-negative and size is
//! within `1..=MAX_PAGE_SIZE`. Out-of-range inputs are coerced rather than
//! rejected; only an unknown sort property or direction is an error.

use serde::Serialize;

use crate::error::CoreError;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(CoreError::BadRequest(format!(
                "Invalid sort direction: {other}"
            ))),
        }
    }
}

/// Properties a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    Id,
    Name,
}

impl SortProperty {
    /// Column name in SQL. Only ever one of a fixed set, safe to interpolate.
    pub fn column(self) -> &'static str {
        match self {
            SortProperty::Id => "id",
            SortProperty::Name => "name",
        }
    }

    fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim() {
            "id" => Ok(SortProperty::Id),
            "name" => Ok(SortProperty::Name),
            other => Err(CoreError::BadRequest(format!(
                "Unknown sort property: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub property: SortProperty,
    pub direction: Direction,
}

impl Sort {
    pub fn by(property: SortProperty, direction: Direction) -> Self {
        Self {
            property,
            direction,
        }
    }

    /// Parse `"property"` or `"property,direction"`.
    ///
    /// A bare property sorts ascending.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let mut parts = raw.splitn(2, ',');
        let property = SortProperty::parse(parts.next().unwrap_or_default())?;
        let direction = match parts.next() {
            Some(dir) if !dir.trim().is_empty() => Direction::parse(dir)?,
            _ => Direction::Asc,
        };
        Ok(Self::by(property, direction))
    }
}

impl Default for Sort {
    /// Newest first.
    fn default() -> Self {
        Self::by(SortProperty::Id, Direction::Desc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: Sort,
}

impl PageRequest {
    /// Build a normalized request.
    pub fn of(page: i64, size: i64, sort: Sort) -> Self {
        let size = if size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            size.min(MAX_PAGE_SIZE)
        };
        Self {
            page: page.max(0),
            size,
            sort,
        }
    }

    /// Build a request from raw query parameters, applying defaults for
    /// anything missing.
    pub fn from_params(
        page: Option<i64>,
        size: Option<i64>,
        sort: Option<&str>,
    ) -> Result<Self, CoreError> {
        let sort = match sort {
            Some(raw) if !raw.trim().is_empty() => Sort::parse(raw)?,
            _ => Sort::default(),
        };
        Ok(Self::of(
            page.unwrap_or(0),
            size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort,
        ))
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::of(0, DEFAULT_PAGE_SIZE, Sort::default())
    }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index.
    pub number: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub number_of_elements: i64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let total_pages = if total_elements <= 0 {
            0
        } else {
            (total_elements - 1) / request.size + 1
        };
        let number_of_elements = content.len() as i64;
        Self {
            number: request.page,
            size: request.size,
            total_elements,
            total_pages,
            number_of_elements,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
            empty: content.is_empty(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn default_request_is_five_newest_first() {
        let req = PageRequest::default();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, 5);
        assert_eq!(req.sort, Sort::by(SortProperty::Id, Direction::Desc));
    }

    #[test]
    fn from_params_applies_overrides() {
        let req = PageRequest::from_params(Some(2), Some(10), Some("name,ASC")).unwrap();
        assert_eq!(req.page, 2);
        assert_eq!(req.size, 10);
        assert_eq!(req.sort, Sort::by(SortProperty::Name, Direction::Asc));
        assert_eq!(req.offset(), 20);
    }

    #[test]
    fn out_of_range_values_are_coerced() {
        let req = PageRequest::from_params(Some(-3), Some(0), None).unwrap();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, DEFAULT_PAGE_SIZE);

        let req = PageRequest::from_params(None, Some(1_000_000), None).unwrap();
        assert_eq!(req.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn bare_sort_property_is_ascending() {
        assert_eq!(
            Sort::parse("id").unwrap(),
            Sort::by(SortProperty::Id, Direction::Asc)
        );
    }

    #[test]
    fn unknown_sort_property_is_rejected() {
        assert_matches!(Sort::parse("rating,desc"), Err(CoreError::BadRequest(msg)) if msg.contains("rating"));
    }

    #[test]
    fn unknown_direction_is_rejected() {
        assert_matches!(Sort::parse("name,sideways"), Err(CoreError::BadRequest(_)));
    }

    #[test]
    fn page_totals_round_up() {
        let req = PageRequest::default();
        let page = Page::new(vec![1, 2, 3, 4, 5], &req, 11);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number_of_elements, 5);
        assert!(page.first);
        assert!(!page.last);
        assert!(!page.empty);
    }

    #[test]
    fn empty_store_yields_empty_last_page() {
        let page: Page<i32> = Page::new(Vec::new(), &PageRequest::default(), 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
        assert!(page.empty);
    }

    #[test]
    fn page_serializes_camel_case() {
        let page = Page::new(vec!["a"], &PageRequest::default(), 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["numberOfElements"], 1);
        assert_eq!(json["content"][0], "a");
    }

    #[test]
    fn farthest_page_is_empty_and_last() {
        let req = PageRequest::of(i64::MAX, MAX_PAGE_SIZE, Sort::default());
        assert_eq!(req.offset(), i64::MAX);

        let page: Page<i32> = Page::new(Vec::new(), &req, 3);
        assert_eq!(page.number, i64::MAX);
        assert_eq!(page.total_pages, 1);
        assert!(page.last);
        assert!(!page.first);
        assert!(page.empty);
    }
}
