//! Bookverse Storefront library.
//!
//! Everything the storefront front end needs beyond the pure domain types:
//!
//! - [`cart`] - The persistent cart store and its storage adapters
//! - [`catalog`] - Client for the external book catalog service
//! - [`payment`] - Client for the external payment service
//! - [`checkout`] - Checkout and order-completion flow
//! - [`views`] - Text views of carts and catalog pages
//! - [`state`] - Application state built once at startup
//! - [`config`] - Configuration loaded from the environment
//! - [`error`] - Unified error type with Sentry integration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
mod http;
pub mod payment;
pub mod state;
pub mod views;

#[cfg(test)]
mod test_support;
