//! Core types for Bookverse.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod book;
pub mod cart;
pub mod id;
pub mod page;
pub mod price;

pub use book::Book;
pub use cart::{AddOutcome, AdjustOutcome, Cart, CartEntry, CartError, CartLine, RemoveOutcome};
pub use id::{BookId, resolve_identifier};
pub use page::Page;
pub use price::Price;
