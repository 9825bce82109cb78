//! Application state built once at startup.

use std::sync::Arc;

use crate::cart::{CartStore, FileStorage};
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::payment::PaymentClient;

/// Application state shared by every command.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the external service clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    payment: PaymentClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if either service client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, AppError> {
        let catalog = CatalogClient::new(&config)?;
        let payment = PaymentClient::new(&config)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                payment,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the payment client.
    #[must_use]
    pub fn payment(&self) -> &PaymentClient {
        &self.inner.payment
    }

    /// Open the session's cart, stored under the configured data directory.
    #[must_use]
    pub fn open_cart(&self) -> CartStore<FileStorage> {
        CartStore::open(FileStorage::new(self.inner.config.data_dir.clone()))
    }
}
