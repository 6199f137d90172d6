//! Pagination query parameters and metadata.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::pagination::Page;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
/// Pages are 1-based; a missing page means the first one.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,
}

impl PaginationParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

/// Query parameters of the owner search.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct OwnerSearchParams {
    #[serde(default)]
    pub last_name: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,
}

impl OwnerSearchParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

/// Position of a page within the whole result set.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl<T> From<&Page<T>> for PaginationMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::PageRequest;

    #[test]
    fn test_page_defaults_to_first() {
        let params: OwnerSearchParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page(), 1);
        assert!(params.last_name.is_none());
    }

    #[test]
    fn test_page_parsed_from_string() {
        let params: PaginationParams = serde_json::from_str(r#"{"page": "3"}"#).unwrap();
        assert_eq!(params.page(), 3);
    }

    #[test]
    fn test_page_not_a_number_is_error() {
        assert!(serde_json::from_str::<PaginationParams>(r#"{"page": "x"}"#).is_err());
    }

    #[test]
    fn test_meta_from_page() {
        let page: Page<i32> = Page::new(vec![1, 2], PageRequest::new(2, 2), 5);
        let meta = PaginationMeta::from(&page);

        assert_eq!(meta.page, 2);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.total_items, 5);
    }
}
