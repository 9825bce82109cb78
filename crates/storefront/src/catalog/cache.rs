//! Cache types for catalog responses.

use bookverse_core::{Book, Page};

use super::query::BookQuery;

/// Cache key for listings and single books.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    /// A normalized listing query.
    Books(BookQuery),
    /// A book by the identifier it was requested with.
    Book(String),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Books(Page<Book>),
    Book(Box<Book>),
}
