//! Payment request and response types.

use std::fmt;

use bookverse_core::CartLine;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Message used when the service gives no reason for a failure.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to create payment intent";

/// Body of a create-payment-intent request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub items: Vec<CartLine>,
}

/// Response body of the payment service, on success and failure alike.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentIntentResponse {
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A created payment intent, ready for the hosted payment form.
pub struct PaymentSession {
    client_secret: SecretString,
    publishable_key: Option<String>,
}

impl PaymentSession {
    pub(crate) fn new(client_secret: String, publishable_key: Option<String>) -> Self {
        Self {
            client_secret: SecretString::from(client_secret),
            publishable_key,
        }
    }

    /// Client secret of the payment intent.
    #[must_use]
    pub const fn client_secret(&self) -> &SecretString {
        &self.client_secret
    }

    /// Publishable key the payment form is initialized with, if configured.
    #[must_use]
    pub fn publishable_key(&self) -> Option<&str> {
        self.publishable_key.as_deref()
    }
}

impl fmt::Debug for PaymentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentSession")
            .field("client_secret", &"[REDACTED]")
            .field("publishable_key", &self.publishable_key)
            .finish()
    }
}
