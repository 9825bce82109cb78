//! Command implementations.

pub mod books;
pub mod cart;
pub mod checkout;

use std::io::{self, Write};

use bookverse_core::{BookId, Book};
use bookverse_storefront::cart::{CartStorage, CartStore, PersistStatus};
use bookverse_storefront::error::AppError;

/// Write the user-facing message for `err` to stderr.
pub fn print_error(err: &AppError) {
    // Nothing sensible is left to do if stderr is gone
    let _ = writeln!(io::stderr().lock(), "Error: {}", err.user_message());
}

/// Parse a user-supplied book identifier.
fn book_id(id: &str) -> Result<BookId, AppError> {
    BookId::parse(id.trim())
        .ok_or_else(|| AppError::BadRequest("a book ID or ISBN is required".to_string()))
}

/// Warn when the last cart change could not be saved.
fn note_persistence<S: CartStorage>(
    out: &mut impl Write,
    store: &CartStore<S>,
) -> io::Result<()> {
    if let PersistStatus::Degraded { reason } = store.persistence() {
        writeln!(out, "Warning: the cart could not be saved ({reason})")?;
    }
    Ok(())
}

/// How a book is named in command output.
fn describe(book: &Book) -> String {
    format!("\"{}\" by {}", book.display_title(), book.display_author())
}
