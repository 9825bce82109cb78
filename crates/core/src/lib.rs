//! Bookverse Core - Shared domain types.
//!
//! This crate provides the types used across all Bookverse components:
//! - `storefront` - Catalog/payment clients and the persistent cart store
//! - `cli` - Terminal front end for browsing, cart management and checkout
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage,
//! no HTTP clients. The in-memory [`Cart`] enforces the cart invariants;
//! persisting it is the storefront's job.
//!
//! # Modules
//!
//! - [`types`] - Book identity, prices, cart entries and catalog pages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
