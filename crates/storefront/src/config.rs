//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `BOOKVERSE_API_URL` - Catalog service base URL
//!   (default: `https://bookstoreapi.ramarajumantena.live`)
//! - `BOOKVERSE_PAYMENT_API_URL` - Payment service base URL (default: `BOOKVERSE_API_URL`)
//! - `BOOKVERSE_DATA_DIR` - Directory the cart is persisted in (default: `.bookverse`)
//! - `BOOKVERSE_PAGE_SIZE` - Books per catalog page, 1-100 (default: 10)
//! - `BOOKVERSE_CATALOG_CACHE_TTL_SECS` - Catalog response cache lifetime (default: 300)
//! - `BOOKVERSE_HTTP_TIMEOUT_SECS` - Request timeout for external services (default: 30)
//! - `STRIPE_PUBLISHABLE_KEY` - Publishable key for the hosted payment form
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "https://bookstoreapi.ramarajumantena.live";
const DEFAULT_DATA_DIR: &str = ".bookverse";
const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog service base URL
    pub api_url: Url,
    /// Payment service configuration
    pub payment: PaymentConfig,
    /// Directory holding the persisted cart
    pub data_dir: PathBuf,
    /// Books per catalog page
    pub page_size: u32,
    /// Lifetime of cached catalog responses
    pub catalog_cache_ttl: Duration,
    /// Timeout for requests to external services
    pub http_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Payment service configuration.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Base URL of the service that creates payment sessions
    pub api_url: Url,
    /// Publishable key for the hosted payment form (safe to expose)
    pub publishable_key: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_url(
            "BOOKVERSE_API_URL",
            &get_env_or_default("BOOKVERSE_API_URL", DEFAULT_API_URL),
        )?;
        let payment_api_url = match get_optional_env("BOOKVERSE_PAYMENT_API_URL") {
            Some(value) => parse_url("BOOKVERSE_PAYMENT_API_URL", &value)?,
            None => api_url.clone(),
        };
        let page_size = parse_number(
            "BOOKVERSE_PAGE_SIZE",
            &get_env_or_default("BOOKVERSE_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string()),
        )?;
        validate_page_size(page_size)?;
        let cache_ttl_secs = parse_number(
            "BOOKVERSE_CATALOG_CACHE_TTL_SECS",
            &get_env_or_default(
                "BOOKVERSE_CATALOG_CACHE_TTL_SECS",
                &DEFAULT_CACHE_TTL_SECS.to_string(),
            ),
        )?;
        let timeout_secs = parse_number(
            "BOOKVERSE_HTTP_TIMEOUT_SECS",
            &get_env_or_default(
                "BOOKVERSE_HTTP_TIMEOUT_SECS",
                &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
            ),
        )?;

        Ok(Self {
            api_url,
            payment: PaymentConfig {
                api_url: payment_api_url,
                publishable_key: get_optional_env("STRIPE_PUBLISHABLE_KEY"),
            },
            data_dir: PathBuf::from(get_env_or_default("BOOKVERSE_DATA_DIR", DEFAULT_DATA_DIR)),
            page_size,
            catalog_cache_ttl: Duration::from_secs(cache_ttl_secs),
            http_timeout: Duration::from_secs(timeout_secs),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration with every default applied and nothing read from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the built-in API URL fails to parse.
    pub fn defaults() -> Result<Self, ConfigError> {
        let api_url = parse_url("BOOKVERSE_API_URL", DEFAULT_API_URL)?;
        Ok(Self {
            payment: PaymentConfig {
                api_url: api_url.clone(),
                publishable_key: None,
            },
            api_url,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            page_size: DEFAULT_PAGE_SIZE,
            catalog_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            sentry_dsn: None,
            sentry_environment: None,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an absolute http(s) URL.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_number<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn validate_page_size(page_size: u32) -> Result<(), ConfigError> {
    if (1..=MAX_PAGE_SIZE).contains(&page_size) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "BOOKVERSE_PAGE_SIZE".to_string(),
            format!("must be between 1 and {MAX_PAGE_SIZE} (got {page_size})"),
        ))
    }
}
