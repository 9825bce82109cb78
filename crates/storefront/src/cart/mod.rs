//! Persistent shopping cart.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the session's [`Cart`](bookverse_core::Cart) and is the
//!   only thing that mutates it
//! - Every completed mutation writes the whole cart to a [`CartStorage`]
//! - Storage failures are logged and recorded in [`PersistStatus`]; they never
//!   undo the in-memory change and are never returned to the caller
//!
//! # Example
//!
//! ```rust,ignore
//! use bookverse_storefront::cart::{CartStore, FileStorage};
//!
//! let mut store = CartStore::open(FileStorage::new(".bookverse"));
//! store.add_item_to_cart(book);
//! println!("{} items, {}", store.cart_item_count(), store.cart_total());
//! ```

mod storage;
mod store;

pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CART_STORAGE_KEY, CartStore, PersistStatus};
