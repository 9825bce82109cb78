//! Catalog browsing.

use std::io::{self, Write};

use bookverse_storefront::catalog::{BookQuery, GENRES, known_genre};
use bookverse_storefront::error::AppError;
use bookverse_storefront::state::AppState;
use bookverse_storefront::views::{
    BookDetailView, BookSummaryView, no_books_message, pagination_status,
};
use tracing::{info, warn};

/// Print one page of the catalog.
///
/// # Errors
///
/// Returns an error if the catalog request fails or output cannot be written.
pub async fn list(
    state: &AppState,
    page: u32,
    size: Option<u32>,
    genre: Option<String>,
    search: Option<String>,
) -> Result<(), AppError> {
    let size = size.unwrap_or(state.config().page_size);
    if size == 0 {
        return Err(AppError::BadRequest("page size must be at least 1".to_string()));
    }

    let mut query = BookQuery::new(page, size);
    query.genre = genre.map(resolve_genre);
    query.search_term = search;

    let books = state.catalog().list_books(&query).await?;
    info!(page = query.page, count = books.content.len(), "Listed books");

    let cart = state.open_cart();
    let mut out = io::stdout().lock();

    if books.is_empty() {
        writeln!(out, "{}", no_books_message(&query))?;
        return Ok(());
    }

    for book in &books.content {
        writeln!(
            out,
            "{}",
            BookSummaryView::new(book, cart.quantity_in_cart(book))
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{}", pagination_status(&books, query.page))?;
    Ok(())
}

/// Print the genres `list --genre` accepts.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn genres() -> Result<(), AppError> {
    let mut out = io::stdout().lock();
    for genre in GENRES {
        writeln!(out, "{genre}")?;
    }
    Ok(())
}

/// Spell a known genre the way the catalog does. Unlisted values pass through.
fn resolve_genre(genre: String) -> String {
    known_genre(&genre).map_or_else(
        || {
            warn!(genre = %genre, "Filtering by a genre outside the offered list");
            genre
        },
        String::from,
    )
}

/// Print a single book.
///
/// # Errors
///
/// Returns an error if the book cannot be fetched or output cannot be written.
pub async fn show(state: &AppState, id: &str) -> Result<(), AppError> {
    let book = state.catalog().get_book(id).await?;
    let cart = state.open_cart();

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{}",
        BookDetailView::new(&book, cart.quantity_in_cart(&book))
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_genre_uses_catalog_spelling() {
        assert_eq!(resolve_genre("young adult".to_string()), "Young Adult");
        assert_eq!(resolve_genre(" all ".to_string()), "All");
    }

    #[test]
    fn test_resolve_genre_keeps_unlisted_values() {
        assert_eq!(resolve_genre("Cookbooks".to_string()), "Cookbooks");
    }
}
