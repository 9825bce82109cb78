//! The session's cart store.

use bookverse_core::{
    AddOutcome, AdjustOutcome, Book, BookId, Cart, CartEntry, CartLine, Price, RemoveOutcome,
};
use tracing::{debug, error, warn};

use super::storage::{CartStorage, StorageError};

/// Key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "bookverse_cart";

/// Outcome of the most recent persistence write.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PersistStatus {
    /// No mutation has been written during this session.
    #[default]
    Unwritten,
    /// The last write succeeded.
    Persisted,
    /// The last write failed; the in-memory cart is ahead of storage.
    Degraded { reason: String },
}

/// Single source of truth for a session's cart.
///
/// Constructed once per session with [`CartStore::open`] and passed to whatever
/// needs it. Mutators run to completion, including the storage write, before
/// returning.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    persistence: PersistStatus,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the store, rehydrating any previously saved cart.
    ///
    /// Missing, unreadable or malformed data yields an empty cart.
    pub fn open(storage: S) -> Self {
        let cart = rehydrate(&storage);
        debug!(entries = cart.len(), "Cart store opened");
        Self {
            cart,
            storage,
            persistence: PersistStatus::Unwritten,
        }
    }

    /// Add one copy of `book`, or increment it if already present.
    ///
    /// A book with neither ID nor ISBN is a caller bug: it is logged and the
    /// cart is left unchanged.
    pub fn add_item_to_cart(&mut self, book: Book) -> AddOutcome {
        let title = book.display_title().to_string();
        let outcome = self.cart.add(book);
        match outcome {
            AddOutcome::Unidentified => {
                error!(title = %title, "Cannot add book to cart: no valid identifier (id or isbn)");
            }
            AddOutcome::Inserted | AddOutcome::Incremented { .. } => {
                debug!(?outcome, "Added book to cart");
                self.persist();
            }
        }
        outcome
    }

    /// Change the quantity of `id` by `delta`, removing it at zero or below.
    pub fn adjust_item_quantity(&mut self, id: &BookId, delta: i64) -> AdjustOutcome {
        let outcome = self.cart.adjust(id, delta);
        if outcome == AdjustOutcome::NotFound {
            warn!(book_id = %id, delta, "Attempted to adjust quantity for unknown book");
        } else {
            debug!(book_id = %id, delta, ?outcome, "Adjusted cart quantity");
            self.persist();
        }
        outcome
    }

    /// Remove `id` from the cart. Removing an absent book is a no-op.
    pub fn remove_item_from_cart(&mut self, id: &BookId) -> RemoveOutcome {
        let outcome = self.cart.remove(id);
        match outcome {
            RemoveOutcome::NotFound => {
                warn!(book_id = %id, "Attempted to remove unknown book from cart");
            }
            RemoveOutcome::Removed { quantity } => {
                debug!(book_id = %id, quantity, "Removed book from cart");
            }
        }
        self.persist();
        outcome
    }

    /// Empty the cart. Returns how many entries were dropped.
    pub fn clear_cart(&mut self) -> usize {
        let dropped = self.cart.clear();
        debug!(dropped, "Cleared cart");
        self.persist();
        dropped
    }

    /// Sum of price times quantity over all entries.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total()
    }

    /// Sum of quantities over all entries.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Copies of `book` already in the cart.
    #[must_use]
    pub fn quantity_in_cart(&self, book: &Book) -> u32 {
        book.identifier()
            .map_or(0, |id| self.cart.quantity_of(&id))
    }

    /// Current entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        self.cart.entries()
    }

    /// `{id, quantity}` pairs for the payment service.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.cart.lines()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Outcome of the most recent write.
    #[must_use]
    pub const fn persistence(&self) -> &PersistStatus {
        &self.persistence
    }

    /// Returns false if the last write failed.
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        !matches!(self.persistence, PersistStatus::Degraded { .. })
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Write the full cart. Failures are logged and recorded, never returned.
    fn persist(&mut self) {
        self.persistence = match self.write_snapshot() {
            Ok(()) => PersistStatus::Persisted,
            Err(e) => {
                error!(error = %e, key = CART_STORAGE_KEY, "Failed to save cart");
                PersistStatus::Degraded {
                    reason: e.to_string(),
                }
            }
        };
    }

    fn write_snapshot(&mut self) -> Result<(), StorageError> {
        let snapshot = serde_json::to_string(self.cart.entries())?;
        self.storage.save(CART_STORAGE_KEY, &snapshot)
    }
}

fn rehydrate<S: CartStorage>(storage: &S) -> Cart {
    let stored = match storage.load(CART_STORAGE_KEY) {
        Ok(Some(stored)) => stored,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(error = %e, key = CART_STORAGE_KEY, "Failed to read saved cart, starting empty");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Vec<CartEntry>>(&stored) {
        Ok(entries) => Cart::from_entries(entries),
        Err(e) => {
            warn!(error = %e, key = CART_STORAGE_KEY, "Failed to parse saved cart, starting empty");
            Cart::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use super::*;
    use crate::cart::MemoryStorage;
    use crate::test_support::{capture_logs, find_event};

    fn price(dollars: f64) -> Price {
        Price::from_f64(dollars).unwrap()
    }

    fn book(id: &str, price: f64) -> Book {
        Book {
            id: Some(id.to_string()),
            title: Some(format!("Book {id}")),
            price: Some(price),
            ..Book::default()
        }
    }

    /// Storage whose writes always fail.
    #[derive(Default)]
    struct ReadOnlyStorage {
        inner: MemoryStorage,
    }

    impl CartStorage for ReadOnlyStorage {
        fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.load(key)
        }

        fn save(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                source: io::Error::other("disk full"),
            })
        }
    }

    /// Storage whose reads always fail.
    struct UnreadableStorage;

    impl CartStorage for UnreadableStorage {
        fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_string(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_open_empty_storage() {
        let store = CartStore::open(MemoryStorage::new());
        assert!(store.is_empty());
        assert_eq!(store.persistence(), &PersistStatus::Unwritten);
    }

    #[test]
    fn test_add_twice_persists_single_entry() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item_to_cart(book("b1", 10.0));
        store.add_item_to_cart(book("b1", 10.0));

        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.cart_item_count(), 2);
        assert_eq!(store.cart_total(), price(20.0));
        assert_eq!(store.persistence(), &PersistStatus::Persisted);

        let saved = store.storage().get(CART_STORAGE_KEY).unwrap();
        let entries: Vec<CartEntry> = serde_json::from_str(saved).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity(), 2);
    }

    #[test]
    fn test_adjust_to_zero_removes_and_persists() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item_to_cart(book("b1", 10.0));
        store.add_item_to_cart(book("b2", 5.0));

        let outcome = store.adjust_item_quantity(&BookId::from("b1"), -2);

        assert_eq!(outcome, AdjustOutcome::Removed);
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.cart_total(), price(5.0));
        assert_eq!(store.cart_item_count(), 1);

        let reopened = CartStore::open(store.storage().clone());
        assert_eq!(reopened.cart(), store.cart());
    }

    #[test]
    fn test_adjust_missing_does_not_write() {
        let mut store = CartStore::open(MemoryStorage::new());
        let outcome = store.adjust_item_quantity(&BookId::from("b1"), 1);

        assert_eq!(outcome, AdjustOutcome::NotFound);
        assert!(store.is_empty());
        assert!(store.storage().get(CART_STORAGE_KEY).is_none());
        assert_eq!(store.persistence(), &PersistStatus::Unwritten);
    }

    #[test]
    fn test_add_unidentified_is_noop() {
        let mut store = CartStore::open(MemoryStorage::new());
        let outcome = store.add_item_to_cart(Book {
            title: Some("Mystery".to_string()),
            ..Book::default()
        });

        assert_eq!(outcome, AddOutcome::Unidentified);
        assert!(store.is_empty());
        assert!(store.storage().get(CART_STORAGE_KEY).is_none());
    }

    #[test]
    fn test_remove_missing_on_empty_cart() {
        let mut store = CartStore::open(MemoryStorage::new());
        let outcome = store.remove_item_from_cart(&BookId::from("zzz"));

        assert_eq!(outcome, RemoveOutcome::NotFound);
        assert!(store.is_empty());
        assert_eq!(store.storage().get(CART_STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item_to_cart(book("b1", 3.0));

        assert_eq!(store.clear_cart(), 1);
        assert_eq!(store.clear_cart(), 0);
        assert!(store.is_empty());
        assert_eq!(store.cart_total(), Price::ZERO);
        assert_eq!(store.storage().get(CART_STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_rehydrates_saved_cart() {
        let saved = r#"[{"book":{"id":"b1","title":"Dune","price":9.5},"quantity":3}]"#;
        let store = CartStore::open(MemoryStorage::with_value(CART_STORAGE_KEY, saved));

        assert_eq!(store.cart_item_count(), 3);
        assert_eq!(store.cart_total(), price(28.5));
        assert_eq!(store.entries()[0].book().display_title(), "Dune");
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        for corrupt in ["{not json", "{\"book\": 1}", "[{\"book\":{},\"quantity\":-1}]"] {
            let store = CartStore::open(MemoryStorage::with_value(CART_STORAGE_KEY, corrupt));
            assert!(store.is_empty(), "expected empty cart for {corrupt:?}");
        }
    }

    #[test]
    fn test_unreadable_storage_starts_empty() {
        let mut store = CartStore::open(UnreadableStorage);
        assert!(store.is_empty());
        store.add_item_to_cart(book("b1", 1.0));
        assert!(store.is_durable());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = CartStore::open(ReadOnlyStorage::default());
        let outcome = store.add_item_to_cart(book("b1", 4.0));

        assert_eq!(outcome, AddOutcome::Inserted);
        assert_eq!(store.cart_item_count(), 1);
        assert!(!store.is_durable());
        assert!(matches!(
            store.persistence(),
            PersistStatus::Degraded { reason } if reason.contains("disk full")
        ));
    }

    #[test]
    fn test_quantity_in_cart_uses_isbn_fallback() {
        let mut store = CartStore::open(MemoryStorage::new());
        let by_isbn = Book {
            isbn: Some("978-1".to_string()),
            price: Some(7.0),
            ..Book::default()
        };
        assert_eq!(store.quantity_in_cart(&by_isbn), 0);

        store.add_item_to_cart(by_isbn.clone());
        store.add_item_to_cart(by_isbn.clone());

        assert_eq!(store.quantity_in_cart(&by_isbn), 2);
        assert_eq!(store.quantity_in_cart(&Book::default()), 0);
    }

    // =========================================================================
    // Logging
    // =========================================================================

    #[test]
    fn test_unidentified_add_logs_error() {
        let mut store = CartStore::open(MemoryStorage::new());
        let (outcome, logs) = capture_logs(|| {
            store.add_item_to_cart(Book {
                title: Some("Mystery".to_string()),
                ..Book::default()
            })
        });

        assert_eq!(outcome, AddOutcome::Unidentified);
        let line = find_event(&logs, "ERROR", "no valid identifier").unwrap();
        assert!(line.contains("title=Mystery"), "{line}");
    }

    #[test]
    fn test_adjust_missing_logs_warning() {
        let mut store = CartStore::open(MemoryStorage::new());
        let (_, logs) = capture_logs(|| store.adjust_item_quantity(&BookId::from("b1"), 1));

        let line = find_event(&logs, "WARN", "adjust quantity for unknown book").unwrap();
        assert!(line.contains("book_id=b1"), "{line}");
        assert!(line.contains("delta=1"), "{line}");
    }

    #[test]
    fn test_remove_missing_logs_warning() {
        let mut store = CartStore::open(MemoryStorage::new());
        let (_, logs) = capture_logs(|| store.remove_item_from_cart(&BookId::from("zzz")));

        let line = find_event(&logs, "WARN", "remove unknown book").unwrap();
        assert!(line.contains("book_id=zzz"), "{line}");
    }

    #[test]
    fn test_remove_present_does_not_warn() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item_to_cart(book("b1", 2.0));
        let (_, logs) = capture_logs(|| store.remove_item_from_cart(&BookId::from("b1")));

        assert!(logs.iter().all(|line| !line.starts_with("WARN")), "{logs:?}");
        assert!(find_event(&logs, "DEBUG", "Removed book from cart").is_some());
    }

    #[test]
    fn test_corrupt_storage_logs_warning() {
        let (store, logs) = capture_logs(|| {
            CartStore::open(MemoryStorage::with_value(CART_STORAGE_KEY, "{not json"))
        });

        assert!(store.is_empty());
        let line = find_event(&logs, "WARN", "Failed to parse saved cart").unwrap();
        assert!(line.contains("key=\"bookverse_cart\""), "{line}");
    }

    #[test]
    fn test_unreadable_storage_logs_warning() {
        let (_, logs) = capture_logs(|| CartStore::open(UnreadableStorage));
        assert!(find_event(&logs, "WARN", "Failed to read saved cart").is_some());
    }

    #[test]
    fn test_write_failure_logs_error() {
        let mut store = CartStore::open(ReadOnlyStorage::default());
        let (_, logs) = capture_logs(|| store.add_item_to_cart(book("b1", 4.0)));

        let line = find_event(&logs, "ERROR", "Failed to save cart").unwrap();
        assert!(line.contains("disk full"), "{line}");
    }
}
