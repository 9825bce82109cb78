//! Cart management.

use std::io::{self, Write};

use bookverse_core::{AddOutcome, AdjustOutcome, Book, BookId, RemoveOutcome};
use bookverse_storefront::cart::{CartStorage, CartStore};
use bookverse_storefront::error::{AppError, add_breadcrumb};
use bookverse_storefront::state::AppState;
use bookverse_storefront::views::CartView;

use super::{book_id, describe, note_persistence};

/// Print the cart.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn show(state: &AppState) -> Result<(), AppError> {
    let store = state.open_cart();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", CartView::new(store.cart()))?;
    Ok(())
}

/// Fetch a book from the catalog and add one copy to the cart.
///
/// Books without a usable positive price are refused.
///
/// # Errors
///
/// Returns an error if the book cannot be fetched, is not for sale, or has
/// no identifier.
pub async fn add(state: &AppState, id: &str) -> Result<(), AppError> {
    let id = book_id(id)?;
    let book = state.catalog().get_book(id.as_str()).await?;

    if !book.is_purchasable() {
        return Err(AppError::BadRequest(format!(
            "{} is not available for purchase",
            describe(&book)
        )));
    }

    let label = describe(&book);
    let mut store = state.open_cart();
    let (key, quantity) = add_book(&mut store, book)?;
    add_breadcrumb("cart", "Added book", Some(&[("book_id", key.as_str())]));

    let mut out = io::stdout().lock();
    writeln!(out, "Added {label} to the cart ({quantity} in cart)")?;
    note_persistence(&mut out, &store)?;
    Ok(())
}

/// Add `book` to the cart, returning the identifier it is stored under and
/// its new quantity.
fn add_book<S: CartStorage>(
    store: &mut CartStore<S>,
    book: Book,
) -> Result<(BookId, u32), AppError> {
    let label = describe(&book);
    let key = book.identifier();
    match (store.add_item_to_cart(book), key) {
        (AddOutcome::Inserted, Some(key)) => Ok((key, 1)),
        (AddOutcome::Incremented { quantity }, Some(key)) => Ok((key, quantity)),
        _ => Err(AppError::Internal(format!(
            "catalog returned {label} without an ID or ISBN"
        ))),
    }
}

/// Change a book's quantity by `delta`.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] if the book is not in the cart.
pub fn adjust(state: &AppState, id: &str, delta: i64) -> Result<(), AppError> {
    let id = book_id(id)?;
    let mut store = state.open_cart();

    let mut out = io::stdout().lock();
    match store.adjust_item_quantity(&id, delta) {
        AdjustOutcome::Updated { quantity } => {
            writeln!(out, "{id}: {quantity} in cart")?;
        }
        AdjustOutcome::Removed => writeln!(out, "Removed {id} from the cart")?,
        AdjustOutcome::NotFound => {
            return Err(AppError::NotFound(format!("{id} is not in the cart")));
        }
    }
    note_persistence(&mut out, &store)?;
    Ok(())
}

/// Remove a book from the cart.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn remove(state: &AppState, id: &str) -> Result<(), AppError> {
    let id = book_id(id)?;
    let mut store = state.open_cart();

    let mut out = io::stdout().lock();
    match store.remove_item_from_cart(&id) {
        RemoveOutcome::Removed { .. } => writeln!(out, "Removed {id} from the cart")?,
        RemoveOutcome::NotFound => writeln!(out, "{id} was not in the cart")?,
    }
    note_persistence(&mut out, &store)?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn clear(state: &AppState) -> Result<(), AppError> {
    let mut store = state.open_cart();
    let dropped = store.clear_cart();

    let mut out = io::stdout().lock();
    writeln!(out, "Cleared the cart ({dropped} books removed)")?;
    note_persistence(&mut out, &store)?;
    Ok(())
}
