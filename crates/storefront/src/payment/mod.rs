//! Client for the external payment service.
//!
//! The payment service creates a payment intent for the cart's lines and
//! returns a client secret. The secret is handed to the hosted payment form;
//! card details never pass through the storefront.

mod client;
mod types;

pub use client::PaymentClient;
pub use types::{DEFAULT_FAILURE_MESSAGE, PaymentRequest, PaymentSession};

use thiserror::Error;

/// Errors that can occur when creating a payment intent.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL cannot carry a path.
    #[error("Invalid payment URL: {0}")]
    InvalidUrl(String),

    /// The service rejected the request.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The service answered 2xx without a client secret.
    #[error("Failed to get client secret: {0}")]
    MissingClientSecret(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
