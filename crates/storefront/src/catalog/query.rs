//! Catalog listing queries and endpoint URLs.

use url::Url;

use super::CatalogError;
use crate::http::endpoint;

/// Genre filter value meaning "no filter".
pub const ALL_GENRES: &str = "All";

/// Genres the storefront offers as filters, in display order.
pub const GENRES: &[&str] = &[
    ALL_GENRES,
    "Fiction",
    "Science Fiction",
    "Fantasy",
    "Mystery",
    "Thriller",
    "Romance",
    "Historical Fiction",
    "Contemporary",
    "Young Adult",
    "Children's",
    "Non-Fiction",
    "Biography",
    "History",
    "Science",
    "Self-Help",
    "Poetry",
];

/// The offered genre matching `name`, ignoring case and surrounding space.
#[must_use]
pub fn known_genre(name: &str) -> Option<&'static str> {
    let name = name.trim();
    GENRES.iter().copied().find(|g| g.eq_ignore_ascii_case(name))
}

/// A request for one page of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookQuery {
    /// 1-based page number.
    pub page: u32,
    pub size: u32,
    pub genre: Option<String>,
    pub search_term: Option<String>,
}

impl BookQuery {
    /// Unfiltered query for `page` (clamped to at least 1).
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size,
            genre: None,
            search_term: None,
        }
    }

    /// Restrict to a genre.
    #[must_use]
    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Restrict to a search term.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// The same query with filters that have no effect removed.
    ///
    /// A blank or `"All"` genre is dropped; the search term is trimmed and
    /// dropped when blank.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            page: self.page.max(1),
            size: self.size,
            genre: self
                .genre
                .as_deref()
                .map(str::trim)
                .filter(|g| !g.is_empty() && *g != ALL_GENRES)
                .map(String::from),
            search_term: self
                .search_term
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
        }
    }
}

/// URL of the listing endpoint for `query`.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidUrl`] if `base` cannot carry a path.
pub fn books_url(base: &Url, query: &BookQuery) -> Result<Url, CatalogError> {
    let query = query.normalized();
    let mut url =
        endpoint(base, &["books"]).ok_or_else(|| CatalogError::InvalidUrl(base.to_string()))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("page", &query.page.to_string())
            .append_pair("size", &query.size.to_string());
        if let Some(genre) = &query.genre {
            pairs.append_pair("genre", genre);
        }
        if let Some(term) = &query.search_term {
            pairs.append_pair("searchTerm", term);
        }
    }
    Ok(url)
}

/// URL of the detail endpoint for `identifier`.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidUrl`] if `base` cannot carry a path.
pub fn book_url(base: &Url, identifier: &str) -> Result<Url, CatalogError> {
    endpoint(base, &["books", identifier]).ok_or_else(|| CatalogError::InvalidUrl(base.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.example/").unwrap()
    }

    #[test]
    fn test_books_url_unfiltered() {
        let url = books_url(&base(), &BookQuery::new(1, 10)).unwrap();
        assert_eq!(url.as_str(), "https://api.example/books?page=1&size=10");
    }

    #[test]
    fn test_books_url_with_filters() {
        let query = BookQuery::new(2, 10).genre("Science Fiction").search("  dune ");
        let url = books_url(&base(), &query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example/books?page=2&size=10&genre=Science+Fiction&searchTerm=dune"
        );
    }

    #[test]
    fn test_all_genre_and_blank_search_are_dropped() {
        let query = BookQuery::new(1, 5).genre("All").search("   ");
        assert_eq!(query.normalized(), BookQuery::new(1, 5));
        let url = books_url(&base(), &query).unwrap();
        assert_eq!(url.as_str(), "https://api.example/books?page=1&size=5");
    }

    #[test]
    fn test_genres_start_with_all() {
        assert_eq!(GENRES.first(), Some(&ALL_GENRES));
        assert_eq!(GENRES.len(), 17);
        assert!(GENRES.contains(&"Children's"));
    }

    #[test]
    fn test_known_genre_is_case_insensitive() {
        assert_eq!(known_genre(" science fiction "), Some("Science Fiction"));
        assert_eq!(known_genre("POETRY"), Some("Poetry"));
        assert_eq!(known_genre("Cookbooks"), None);
    }

    #[test]
    fn test_page_is_at_least_one() {
        assert_eq!(BookQuery::new(0, 10).page, 1);
    }

    #[test]
    fn test_book_url_encodes_identifier() {
        let url = book_url(&base(), "978 0/1").unwrap();
        assert_eq!(url.as_str(), "https://api.example/books/978%200%2F1");
    }
}
