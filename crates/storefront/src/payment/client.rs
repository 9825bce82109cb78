//! Payment REST client implementation.

use std::sync::Arc;

use tracing::{debug, instrument};
use url::Url;

use super::PaymentError;
use super::types::{
    DEFAULT_FAILURE_MESSAGE, PaymentIntentResponse, PaymentRequest, PaymentSession,
};
use crate::config::StorefrontConfig;
use crate::http::{LOG_BODY_PREVIEW, build_client, endpoint, preview};

/// Client for the payment service.
#[derive(Clone)]
pub struct PaymentClient {
    inner: Arc<PaymentClientInner>,
}

struct PaymentClientInner {
    client: reqwest::Client,
    endpoint: Url,
    publishable_key: Option<String>,
}

impl PaymentClient {
    /// Create a new payment client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL cannot carry a path or the HTTP
    /// client cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self, PaymentError> {
        let base = &config.payment.api_url;
        let endpoint = endpoint(base, &["api", "payment", "create-payment-intent"])
            .ok_or_else(|| PaymentError::InvalidUrl(base.to_string()))?;

        Ok(Self {
            inner: Arc::new(PaymentClientInner {
                client: build_client(config.http_timeout)?,
                endpoint,
                publishable_key: config.payment.publishable_key.clone(),
            }),
        })
    }

    /// Create a payment intent for the given cart lines.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::Api`] when the service rejects the request and
    /// [`PaymentError::MissingClientSecret`] when it accepts it without
    /// returning a secret.
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    pub async fn create_payment_intent(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentSession, PaymentError> {
        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // The error body is best effort; fall back to a generic message
            let message = serde_json::from_str::<PaymentIntentResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            tracing::error!(
                status = %status,
                body = %preview(&body, LOG_BODY_PREVIEW),
                "Payment service returned non-success status"
            );
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: PaymentIntentResponse = serde_json::from_str(&body)?;
        match parsed.client_secret.filter(|s| !s.is_empty()) {
            Some(secret) => {
                debug!("Payment intent created");
                Ok(PaymentSession::new(
                    secret,
                    self.inner.publishable_key.clone(),
                ))
            }
            None => Err(PaymentError::MissingClientSecret(
                parsed
                    .error
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            )),
        }
    }
}
