//! Checkout and order completion.

use std::io::{self, Write};

use bookverse_storefront::checkout::{begin_checkout, complete_order};
use bookverse_storefront::error::AppError;
use bookverse_storefront::state::AppState;
use secrecy::ExposeSecret;

use super::note_persistence;

/// Create a payment intent for the cart and print the order summary.
///
/// # Errors
///
/// Returns an error if the cart is empty or the payment service fails.
pub async fn begin(state: &AppState, show_secret: bool) -> Result<(), AppError> {
    let store = state.open_cart();
    let pending = begin_checkout(&store, state.payment()).await?;

    let mut out = io::stdout().lock();
    writeln!(out, "Order Summary")?;
    writeln!(out, "  Items: {}", pending.summary.item_count)?;
    writeln!(out, "  Total: {}", pending.summary.total)?;
    writeln!(out)?;
    writeln!(out, "Payment is ready.")?;
    if let Some(key) = pending.session.publishable_key() {
        writeln!(out, "Publishable key: {key}")?;
    }
    if show_secret {
        writeln!(
            out,
            "Client secret: {}",
            pending.session.client_secret().expose_secret()
        )?;
    }
    writeln!(
        out,
        "After paying, run `bookverse order complete` to finish the order."
    )?;
    Ok(())
}

/// Complete the order and empty the cart.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn complete(state: &AppState) -> Result<(), AppError> {
    let mut store = state.open_cart();
    let receipt = complete_order(&mut store);

    let mut out = io::stdout().lock();
    writeln!(out, "Payment Successful!")?;
    writeln!(
        out,
        "Thank you for your purchase. Your order #{} has been placed.",
        receipt.reference
    )?;
    writeln!(out, "  Items: {}", receipt.item_count)?;
    writeln!(out, "  Total: {}", receipt.total)?;
    note_persistence(&mut out, &store)?;
    Ok(())
}
