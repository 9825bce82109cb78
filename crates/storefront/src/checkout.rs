//! Checkout and order completion.
//!
//! Checkout reads the cart to create a payment intent; completing an order is
//! the one transition that empties the cart.

use bookverse_core::{Cart, Price};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::cart::{CartStorage, CartStore};
use crate::payment::{PaymentClient, PaymentError, PaymentRequest, PaymentSession};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to pay for.
    #[error("Your cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// Totals shown on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub item_count: u64,
    pub total: Price,
}

impl CheckoutSummary {
    #[must_use]
    pub fn of(cart: &Cart) -> Self {
        Self {
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

/// A checkout in progress: the summary and the payment intent backing it.
#[derive(Debug)]
pub struct PendingCheckout {
    pub summary: CheckoutSummary,
    pub session: PaymentSession,
}

/// Confirmation of a completed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    /// Short reference shown to the customer.
    pub reference: String,
    /// Units that were in the cart.
    pub item_count: u64,
    pub total: Price,
}

/// Build the payment request for `cart`.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no entries.
pub fn payment_request(cart: &Cart) -> Result<PaymentRequest, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    Ok(PaymentRequest {
        items: cart.lines(),
    })
}

/// Start checkout: create a payment intent for the current cart.
///
/// The cart is not modified.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart and
/// [`CheckoutError::Payment`] if the payment service fails.
pub async fn begin_checkout<S: CartStorage>(
    store: &CartStore<S>,
    payments: &PaymentClient,
) -> Result<PendingCheckout, CheckoutError> {
    let request = payment_request(store.cart())?;
    let summary = CheckoutSummary::of(store.cart());
    let session = payments.create_payment_intent(&request).await?;
    Ok(PendingCheckout { summary, session })
}

/// Complete the order after payment succeeded, emptying the cart.
pub fn complete_order<S: CartStorage>(store: &mut CartStore<S>) -> OrderReceipt {
    let summary = CheckoutSummary::of(store.cart());
    store.clear_cart();

    let reference: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(8)
        .collect::<String>()
        .to_uppercase();
    info!(
        order = %reference,
        items = summary.item_count,
        total = %summary.total,
        "Order completed"
    );

    OrderReceipt {
        reference,
        item_count: summary.item_count,
        total: summary.total,
    }
}
