//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for everything the front end can fail
//! at. Entry points report failures with [`AppError::report`], which captures
//! external-service and internal errors to Sentry, and show the user
//! [`AppError::user_message`].

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::payment::PaymentError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog service operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Payment service operation failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Checkout could not start.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the failure is on our side or an upstream service's, rather
    /// than the user's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        match self {
            Self::Catalog(CatalogError::NotFound(_))
            | Self::Checkout(CheckoutError::EmptyCart)
            | Self::NotFound(_)
            | Self::BadRequest(_) => false,
            Self::Catalog(_)
            | Self::Payment(_)
            | Self::Checkout(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Internal(_) => true,
        }
    }

    /// Log the error, capturing server errors to Sentry.
    pub fn report(&self) {
        if self.is_server_error() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command failed"
            );
        } else {
            tracing::info!(error = %self, "Command rejected");
        }
    }

    /// Message safe to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Catalog(CatalogError::NotFound(id)) => {
                format!("Book not found with identifier: {id}")
            }
            Self::Catalog(_) => "The book catalog is unavailable, please try again".to_string(),
            // The payment service's own message is meant for the customer
            Self::Payment(PaymentError::Api { message, .. })
            | Self::Checkout(CheckoutError::Payment(PaymentError::Api { message, .. })) => {
                message.clone()
            }
            Self::Payment(_) | Self::Checkout(CheckoutError::Payment(_)) => {
                "Payment could not be started, please try again".to_string()
            }
            Self::Checkout(CheckoutError::EmptyCart) => "Your cart is empty".to_string(),
            Self::Config(err) => err.to_string(),
            Self::Io(_) | Self::Internal(_) => "Internal error".to_string(),
            Self::NotFound(_) | Self::BadRequest(_) => self.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added book", Some(&[("book_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
