//! Catalog REST client implementation.

use std::sync::Arc;

use bookverse_core::{Book, Page};
use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};
use url::Url;

use super::CatalogError;
use super::cache::{CacheKey, CacheValue};
use super::query::{BookQuery, book_url, books_url};
use crate::config::StorefrontConfig;
use crate::http::{ERROR_BODY_PREVIEW, LOG_BODY_PREVIEW, build_client, preview};

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the book catalog service.
///
/// Listings and single books are cached for the configured TTL.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.catalog_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client: build_client(config.http_timeout)?,
                base_url: config.api_url.clone(),
                cache,
            }),
        })
    }

    /// Fetch one page of books.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the body is not a page of books.
    #[instrument(skip(self), fields(page = query.page, size = query.size))]
    pub async fn list_books(&self, query: &BookQuery) -> Result<Page<Book>, CatalogError> {
        let query = query.normalized();
        let cache_key = CacheKey::Books(query.clone());

        if let Some(CacheValue::Books(page)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for book listing");
            return Ok(page);
        }

        let url = books_url(&self.inner.base_url, &query)?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let page: Page<Book> = parse_body(&body)?;
        debug!(count = page.content.len(), "Fetched book listing");

        self.inner
            .cache
            .insert(cache_key, CacheValue::Books(page.clone()))
            .await;

        Ok(page)
    }

    /// Fetch a single book by ID or ISBN.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] on a 404,
    /// [`CatalogError::UnexpectedContentType`] if the body is not JSON, and
    /// other variants for transport, status and parse failures.
    #[instrument(skip(self))]
    pub async fn get_book(&self, identifier: &str) -> Result<Book, CatalogError> {
        let cache_key = CacheKey::Book(identifier.to_string());

        if let Some(CacheValue::Book(book)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for book");
            return Ok(*book);
        }

        let url = book_url(&self.inner.base_url, identifier)?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(identifier.to_string()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        if !content_type.contains("application/json") {
            tracing::error!(
                content_type = %content_type,
                body = %preview(&body, LOG_BODY_PREVIEW),
                "Catalog returned a non-JSON book"
            );
            return Err(CatalogError::UnexpectedContentType(content_type));
        }

        let book: Book = parse_body(&body)?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Book(Box::new(book.clone())))
            .await;

        Ok(book)
    }
}

fn api_error(status: StatusCode, body: &str) -> CatalogError {
    tracing::error!(
        status = %status,
        body = %preview(body, LOG_BODY_PREVIEW),
        "Catalog returned non-success status"
    );
    CatalogError::Api {
        status: status.as_u16(),
        message: preview(body, ERROR_BODY_PREVIEW),
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, CatalogError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %preview(body, LOG_BODY_PREVIEW),
            "Failed to parse catalog response"
        );
        CatalogError::Parse(e)
    })
}
