//! The cart projection: cart entries resolved against the catalog.
//!
//! An entry whose book id no longer resolves (the book was deleted after
//! the entry was added) is dropped from the projection only — the
//! underlying cart map keeps the dangling quantity. See `Bookstore`'s
//! `delete_book` for the other half of that contract.

use openbook_types::{Book, Cart};

/// One resolved cart entry.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    pub book: Book,
    pub quantity: u32,
    /// `price × quantity` for this line.
    pub line_total: f64,
}

/// The cart as the presentation layer displays it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CartView {
    /// Resolved lines, in the cart map's key order.
    pub lines: Vec<CartLine>,
    /// Sum of resolved line totals.
    pub total: f64,
}

impl CartView {
    /// Returns `true` if nothing resolved (including a non-empty cart made
    /// entirely of orphan entries).
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Resolve `cart` against `books`, silently dropping orphan entries.
pub fn project(books: &[Book], cart: &Cart) -> CartView {
    let mut view = CartView::default();
    for (id, quantity) in cart.iter() {
        let Some(book) = books.iter().find(|b| &b.id == id) else {
            continue;
        };
        let line_total = book.price * f64::from(quantity);
        view.total += line_total;
        view.lines.push(CartLine {
            book: book.clone(),
            quantity,
            line_total,
        });
    }
    view
}
