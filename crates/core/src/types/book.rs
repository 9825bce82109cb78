//! Book as delivered by the catalog service.
//!
//! Books are snapshots: a cart entry keeps the copy it was added with and never
//! re-fetches it. Fields the storefront does not interpret are kept in
//! [`Book::extra`] so they survive a persistence round-trip.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::id::{BookId, resolve_identifier};
use super::price::Price;

/// Title shown for a book without one.
pub const UNTITLED: &str = "Untitled";

/// Author shown for a book without one.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Label shown when a book has no usable price.
pub const PRICE_UNAVAILABLE: &str = "Price N/A";

/// A catalog book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Catalog ID. The catalog sends either a string or an integer.
    #[serde(
        default,
        deserialize_with = "deserialize_identifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// ISBN, used as the identifier when `id` is missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Unit price as sent by the catalog. May be missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Any other fields the catalog sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    /// The identifier this book is keyed by, if it has one.
    #[must_use]
    pub fn identifier(&self) -> Option<BookId> {
        self.identifier_str().map(BookId::from)
    }

    /// Borrowed form of [`Book::identifier`].
    #[must_use]
    pub fn identifier_str(&self) -> Option<&str> {
        resolve_identifier(self.id.as_deref(), self.isbn.as_deref())
    }

    /// Returns true if this book resolves to `id`.
    #[must_use]
    pub fn is_identified_by(&self, id: &BookId) -> bool {
        self.identifier_str() == Some(id.as_str())
    }

    /// Title for display.
    #[must_use]
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(UNTITLED)
    }

    /// Author for display.
    #[must_use]
    pub fn display_author(&self) -> &str {
        non_empty(self.author.as_deref()).unwrap_or(UNKNOWN_AUTHOR)
    }

    /// The catalog price, if it is a valid amount.
    #[must_use]
    pub fn valid_price(&self) -> Option<Price> {
        self.price.and_then(Price::from_f64)
    }

    /// Price used for totals: the valid price, otherwise zero.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.valid_price().unwrap_or(Price::ZERO)
    }

    /// `$12.50`, or `Price N/A` when the price is missing or invalid.
    #[must_use]
    pub fn price_label(&self) -> String {
        self.valid_price()
            .map_or_else(|| PRICE_UNAVAILABLE.to_string(), |price| price.to_string())
    }

    /// Whether the book can be offered for sale (strictly positive price).
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.valid_price().is_some_and(|price| !price.is_zero())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Accept catalog IDs sent as strings or integers.
fn deserialize_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawIdentifier {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(
        Option::<RawIdentifier>::deserialize(deserializer)?.map(|raw| match raw {
            RawIdentifier::Text(s) => s,
            RawIdentifier::Signed(n) => n.to_string(),
            RawIdentifier::Unsigned(n) => n.to_string(),
        }),
    )
}
