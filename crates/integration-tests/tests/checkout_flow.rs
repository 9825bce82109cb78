//! Integration tests for checkout preconditions and order completion.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use bookverse_core::BookId;
use bookverse_integration_tests::{book, isbn_book};
use bookverse_storefront::cart::{CartStore, FileStorage};
use bookverse_storefront::checkout::{CheckoutError, CheckoutSummary, complete_order, payment_request};

#[test]
fn test_payment_request_uses_resolved_identifiers() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CartStore::open(FileStorage::new(dir.path()));
    store.add_item_to_cart(book("b1", 10.0));
    store.add_item_to_cart(isbn_book("978-0", 4.0));
    store.add_item_to_cart(isbn_book("978-0", 4.0));

    let request = payment_request(store.cart()).unwrap();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({
            "items": [
                { "id": "b1", "quantity": 1 },
                { "id": "978-0", "quantity": 2 },
            ]
        })
    );

    let summary = CheckoutSummary::of(store.cart());
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.total.to_string(), "$18.00");
}

#[test]
fn test_emptied_cart_cannot_check_out() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CartStore::open(FileStorage::new(dir.path()));
    store.add_item_to_cart(book("b1", 10.0));
    store.adjust_item_quantity(&BookId::from("b1"), -1);

    assert!(matches!(
        payment_request(store.cart()),
        Err(CheckoutError::EmptyCart)
    ));
}

#[test]
fn test_completed_order_empties_saved_cart() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CartStore::open(FileStorage::new(dir.path()));
    store.add_item_to_cart(book("b1", 10.0));
    store.add_item_to_cart(book("b2", 2.5));

    let receipt = complete_order(&mut store);
    assert_eq!(receipt.item_count, 2);
    assert_eq!(receipt.total.to_string(), "$12.50");

    // A new session starts with an empty cart
    let reopened = CartStore::open(FileStorage::new(dir.path()));
    assert!(reopened.is_empty());
}
