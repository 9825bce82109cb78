//! Book identity.
//!
//! A book's key in the cart is its catalog ID, falling back to its ISBN.
//! [`resolve_identifier`] is the only place that rule lives; every lookup and
//! comparison goes through it so entries can never be keyed two different ways.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Resolve a book's cart key from its catalog ID and ISBN.
///
/// Returns the ID when it is present and non-empty, otherwise the ISBN when
/// it is present and non-empty.
///
/// ```
/// use bookverse_core::resolve_identifier;
///
/// assert_eq!(resolve_identifier(Some("b1"), Some("978-0")), Some("b1"));
/// assert_eq!(resolve_identifier(Some(""), Some("978-0")), Some("978-0"));
/// assert_eq!(resolve_identifier(None, None), None);
/// ```
#[must_use]
pub fn resolve_identifier<'a>(id: Option<&'a str>, isbn: Option<&'a str>) -> Option<&'a str> {
    id.filter(|id| !id.is_empty())
        .or_else(|| isbn.filter(|isbn| !isbn.is_empty()))
}

/// Resolved identifier of a book (catalog ID or ISBN).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Parse a `BookId`, rejecting empty input.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            None
        } else {
            Some(Self(s.to_owned()))
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `BookId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for BookId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for BookId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
