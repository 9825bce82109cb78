//! Text views of carts and catalog pages.
//!
//! Views are plain data built from domain types, with `Display` impls that
//! render them for a terminal.

use std::fmt;

use bookverse_core::{Book, Cart, CartEntry, Page};

use crate::catalog::BookQuery;

// =============================================================================
// Cart
// =============================================================================

/// One cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub quantity: u32,
    /// Formatted unit price, e.g. `$9.99`.
    pub unit_price: String,
    /// Formatted unit price times quantity.
    pub line_total: String,
}

impl CartItemView {
    /// Build the row for `entry`, or `None` if it has no identifier.
    #[must_use]
    pub fn from_entry(entry: &CartEntry) -> Option<Self> {
        let book = entry.book();
        Some(Self {
            id: book.identifier_str()?.to_string(),
            title: book.display_title().to_string(),
            author: book.display_author().to_string(),
            quantity: entry.quantity(),
            unit_price: book.unit_price().to_string(),
            line_total: entry.line_total().to_string(),
        })
    }
}

/// The cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub subtotal: String,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart) -> Self {
        Self {
            items: cart
                .entries()
                .iter()
                .filter_map(CartItemView::from_entry)
                .collect(),
            item_count: cart.item_count(),
            subtotal: cart.total().to_string(),
        }
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            writeln!(f, "Your cart is empty")?;
            return write!(
                f,
                "Looks like you haven't added any books to your cart yet."
            );
        }

        writeln!(f, "Your Shopping Cart")?;
        for item in &self.items {
            writeln!(
                f,
                "  [{}] {} by {}  {} x {} = {}",
                item.id, item.title, item.author, item.quantity, item.unit_price, item.line_total
            )?;
        }
        writeln!(f, "Total Items: {}", self.item_count)?;
        write!(f, "Total: {}", self.subtotal)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// One row of a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummaryView {
    /// Identifier, or empty if the catalog sent none.
    pub id: String,
    pub title: String,
    pub author: String,
    pub price: String,
    pub in_cart: u32,
}

impl BookSummaryView {
    #[must_use]
    pub fn new(book: &Book, in_cart: u32) -> Self {
        Self {
            id: book.identifier_str().unwrap_or_default().to_string(),
            title: book.display_title().to_string(),
            author: book.display_author().to_string(),
            price: book.price_label(),
            in_cart,
        }
    }
}

impl fmt::Display for BookSummaryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} by {} - {}",
            self.id, self.title, self.author, self.price
        )?;
        if self.in_cart > 0 {
            write!(f, " ({} in cart)", self.in_cart)?;
        }
        Ok(())
    }
}

/// The book detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetailView {
    pub summary: BookSummaryView,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub purchasable: bool,
}

impl BookDetailView {
    #[must_use]
    pub fn new(book: &Book, in_cart: u32) -> Self {
        Self {
            summary: BookSummaryView::new(book, in_cart),
            genre: book.genre.clone(),
            publisher: book.publisher.clone(),
            isbn: book.isbn.clone(),
            description: book.description.clone(),
            purchasable: book.is_purchasable(),
        }
    }
}

impl fmt::Display for BookDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary.title)?;
        writeln!(f, "by {}", self.summary.author)?;
        writeln!(f, "Price: {}", self.summary.price)?;
        if let Some(genre) = &self.genre {
            writeln!(f, "Genre: {genre}")?;
        }
        if let Some(publisher) = &self.publisher {
            writeln!(f, "Publisher: {publisher}")?;
        }
        if let Some(isbn) = &self.isbn {
            writeln!(f, "ISBN: {isbn}")?;
        }
        if let Some(description) = &self.description {
            writeln!(f)?;
            writeln!(f, "{description}")?;
        }
        if self.summary.in_cart > 0 {
            writeln!(f)?;
            write!(f, "{} in cart", self.summary.in_cart)?;
        } else if !self.purchasable {
            writeln!(f)?;
            write!(f, "Not available for purchase")?;
        }
        Ok(())
    }
}

/// Status line under a listing, e.g. `Page 2 of 5 (Total Books: 48)`.
///
/// Page numbers show as `?` when the catalog reports no pages.
#[must_use]
pub fn pagination_status<T>(page: &Page<T>, current_page: u32) -> String {
    if page.total_pages > 0 {
        format!(
            "Page {current_page} of {} (Total Books: {})",
            page.total_pages, page.total_elements
        )
    } else {
        format!("Page ? of ? (Total Books: {})", page.total_elements)
    }
}

/// Message shown for an empty listing.
#[must_use]
pub fn no_books_message(query: &BookQuery) -> String {
    let query = query.normalized();
    let mut message = String::from("No books found");
    if let Some(genre) = &query.genre {
        message.push_str(&format!(" in {genre} genre"));
    }
    if let Some(term) = &query.search_term {
        message.push_str(&format!(" for \"{term}\""));
    }
    message.push('.');
    message
}
