//! Integration tests for Bookverse.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bookverse-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store behavior against file-backed storage
//! - `cart_properties` - Property tests over arbitrary operation sequences
//! - `checkout_flow` - Checkout preconditions and order completion
//!
//! The helpers below build catalog books the way the catalog service sends
//! them.

#![cfg_attr(not(test), forbid(unsafe_code))]

use bookverse_core::Book;
use serde_json::json;

/// A book with a catalog ID and a price.
#[must_use]
pub fn book(id: &str, price: f64) -> Book {
    Book {
        id: Some(id.to_string()),
        title: Some(format!("Book {id}")),
        author: Some("Test Author".to_string()),
        price: Some(price),
        ..Book::default()
    }
}

/// A book identified only by ISBN.
#[must_use]
pub fn isbn_book(isbn: &str, price: f64) -> Book {
    Book {
        isbn: Some(isbn.to_string()),
        title: Some(format!("ISBN {isbn}")),
        price: Some(price),
        ..Book::default()
    }
}

/// A book with neither ID nor ISBN.
#[must_use]
pub fn unidentified_book() -> Book {
    Book {
        title: Some("Mystery".to_string()),
        price: Some(1.0),
        ..Book::default()
    }
}

/// A saved cart as the storage layer holds it.
#[must_use]
pub fn saved_cart(entries: &[(&str, f64, u32)]) -> String {
    let entries: Vec<_> = entries
        .iter()
        .map(|(id, price, quantity)| {
            json!({
                "book": { "id": id, "title": format!("Book {id}"), "price": price },
                "quantity": quantity,
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}
