//! Cart contents and their invariants.
//!
//! [`Cart`] is the in-memory collection: an ordered list of [`CartEntry`]
//! values, unique by resolved book identifier, every quantity at least one.
//! It performs no I/O; the storefront's cart store wraps it with persistence
//! and logging.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::book::Book;
use super::id::BookId;
use super::price::Price;

/// Errors building a [`CartEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The book has neither a catalog ID nor an ISBN.
    #[error("book has no usable identifier (id or isbn)")]
    MissingIdentifier,
    /// Entries must hold at least one unit.
    #[error("cart entry quantity must be at least 1")]
    ZeroQuantity,
}

/// A book and how many copies of it are in the cart.
///
/// Serialized as `{"book": {...}, "quantity": n}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    book: Book,
    quantity: u32,
}

impl CartEntry {
    /// Create an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the book has no identifier or `quantity` is zero.
    pub fn new(book: Book, quantity: u32) -> Result<Self, CartError> {
        if book.identifier_str().is_none() {
            return Err(CartError::MissingIdentifier);
        }
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        Ok(Self { book, quantity })
    }

    /// The book snapshot taken when it was added.
    #[must_use]
    pub const fn book(&self) -> &Book {
        &self.book
    }

    /// Number of copies.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The resolved identifier of the entry's book.
    #[must_use]
    pub fn identifier(&self) -> Option<BookId> {
        self.book.identifier()
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.book.unit_price().times(self.quantity)
    }

    fn is_for(&self, id: &BookId) -> bool {
        self.book.is_identified_by(id)
    }

    fn is_valid(&self) -> bool {
        self.quantity > 0 && self.book.identifier_str().is_some()
    }
}

/// An `{id, quantity}` pair as sent to the payment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: BookId,
    pub quantity: u32,
}

/// Result of [`Cart::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry with quantity 1 was appended.
    Inserted,
    /// An existing entry was incremented.
    Incremented { quantity: u32 },
    /// The book has no identifier; the cart is unchanged.
    Unidentified,
}

/// Result of [`Cart::adjust`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustOutcome {
    /// The entry now holds `quantity` copies.
    Updated { quantity: u32 },
    /// The quantity fell to zero or below and the entry was removed.
    Removed,
    /// No entry has that identifier; the cart is unchanged.
    NotFound,
}

/// Result of [`Cart::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The entry holding `quantity` copies was removed.
    Removed { quantity: u32 },
    /// No entry has that identifier.
    NotFound,
}

/// The cart collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a cart from previously stored entries.
    ///
    /// Entries with no identifier or a zero quantity are dropped, and entries
    /// sharing an identifier are merged into the first occurrence, so the
    /// result always satisfies the cart invariants.
    #[must_use]
    pub fn from_entries(entries: Vec<CartEntry>) -> Self {
        let mut cart = Self::new();
        for entry in entries.into_iter().filter(CartEntry::is_valid) {
            let existing = entry
                .book
                .identifier()
                .and_then(|id| cart.position(&id));
            match existing.and_then(|index| cart.entries.get_mut(index)) {
                Some(kept) => kept.quantity = kept.quantity.saturating_add(entry.quantity),
                None => cart.entries.push(entry),
            }
        }
        cart
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of distinct books.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &BookId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.is_for(id))
    }

    #[must_use]
    pub fn contains(&self, id: &BookId) -> bool {
        self.get(id).is_some()
    }

    /// Copies of `id` in the cart (zero when absent).
    #[must_use]
    pub fn quantity_of(&self, id: &BookId) -> u32 {
        self.get(id).map_or(0, CartEntry::quantity)
    }

    /// Add one copy of `book`.
    pub fn add(&mut self, book: Book) -> AddOutcome {
        let Some(id) = book.identifier() else {
            return AddOutcome::Unidentified;
        };

        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.is_for(&id)) {
            entry.quantity = entry.quantity.saturating_add(1);
            return AddOutcome::Incremented {
                quantity: entry.quantity,
            };
        }

        self.entries.push(CartEntry { book, quantity: 1 });
        AddOutcome::Inserted
    }

    /// Change the quantity of `id` by `delta`.
    ///
    /// A resulting quantity of zero or less removes the entry, whatever the
    /// magnitude of `delta`.
    pub fn adjust(&mut self, id: &BookId, delta: i64) -> AdjustOutcome {
        let Some(index) = self.position(id) else {
            return AdjustOutcome::NotFound;
        };
        let Some(entry) = self.entries.get_mut(index) else {
            return AdjustOutcome::NotFound;
        };

        let new_quantity = i64::from(entry.quantity).saturating_add(delta);
        if new_quantity <= 0 {
            self.entries.remove(index);
            return AdjustOutcome::Removed;
        }

        entry.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        AdjustOutcome::Updated {
            quantity: entry.quantity,
        }
    }

    /// Remove the entry for `id`.
    pub fn remove(&mut self, id: &BookId) -> RemoveOutcome {
        match self.position(id) {
            Some(index) => {
                let entry = self.entries.remove(index);
                RemoveOutcome::Removed {
                    quantity: entry.quantity,
                }
            }
            None => RemoveOutcome::NotFound,
        }
    }

    /// Remove every entry. Returns how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    /// Sum of unit price times quantity. Missing prices count as zero.
    #[must_use]
    pub fn total(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }

    /// `{id, quantity}` pairs for the payment service.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.entries
            .iter()
            .filter_map(|entry| {
                entry.identifier().map(|id| CartLine {
                    id,
                    quantity: entry.quantity,
                })
            })
            .collect()
    }

    fn position(&self, id: &BookId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.is_for(id))
    }
}

impl From<Cart> for Vec<CartEntry> {
    fn from(cart: Cart) -> Self {
        cart.entries
    }
}
