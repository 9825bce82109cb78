//! Paginated catalog responses.

use serde::{Deserialize, Serialize};

/// One page of results from the catalog service.
///
/// Only `content` is required; the metadata fields default when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    /// Requested page size.
    #[serde(default)]
    pub size: u32,
    /// Page number as reported by the service.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default = "default_true")]
    pub first: bool,
    #[serde(default = "default_true")]
    pub last: bool,
    #[serde(default)]
    pub empty: bool,
}

const fn default_true() -> bool {
    true
}

impl<T> Page<T> {
    /// Returns true if a following page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        !self.last
    }

    /// Returns true if a preceding page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        !self.first
    }

    /// Returns true if the page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Book;

    #[test]
    fn test_deserialize_spring_style_page() {
        let json = r#"{
            "content": [{"id": 1, "title": "Dune", "price": 9.99}],
            "pageable": {"pageNumber": 0, "pageSize": 10},
            "totalPages": 3,
            "totalElements": 21,
            "last": false,
            "size": 10,
            "number": 0,
            "numberOfElements": 1,
            "first": true,
            "empty": false
        }"#;

        let page: Page<Book> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 21);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_deserialize_minimal_page() {
        let page: Page<Book> = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(page.is_empty());
        assert!(!page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.total_pages, 0);
    }
}
