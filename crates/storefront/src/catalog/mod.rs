//! Client for the external book catalog service.
//!
//! # Architecture
//!
//! - Plain REST/JSON over `reqwest`
//! - The catalog is source of truth - books are fetched, never stored locally
//!   (the cart keeps its own snapshots)
//! - In-memory caching via `moka` for listing and detail responses
//!
//! # Endpoints
//!
//! - `GET /books?page=&size=[&genre=][&searchTerm=]` - one page of books
//! - `GET /books/{identifier}` - a single book by ID or ISBN
//!
//! # Example
//!
//! ```rust,ignore
//! use bookverse_storefront::catalog::{BookQuery, CatalogClient};
//!
//! let client = CatalogClient::new(&config)?;
//! let page = client.list_books(&BookQuery::new(1, 10).genre("Fantasy")).await?;
//! let book = client.get_book("42").await?;
//! ```

mod cache;
mod client;
mod query;

pub use client::CatalogClient;
pub use query::{ALL_GENRES, BookQuery, GENRES, book_url, books_url, known_genre};

use thiserror::Error;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL cannot carry a path.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// No book has the requested identifier.
    #[error("Book not found with identifier: {0}")]
    NotFound(String),

    /// A detail response was not JSON.
    #[error("Expected JSON response, but received Content-Type: {0}")]
    UnexpectedContentType(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
