use serde::{Deserialize, Serialize};

use crate::id::BookId;

/// A catalog entry.
///
/// `price` is a non-negative JSON number; `available` is purely
/// informational and carries no stock semantics. The `id` never changes
/// after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub available: bool,
}

/// Fields supplied when creating a book. The id is generated by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    /// Optional at creation; defaults to the empty string.
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub available: bool,
}

impl Book {
    /// Build a book from creation fields. Negative prices are clamped to
    /// zero to uphold the non-negative invariant.
    pub fn new(id: BookId, fields: NewBook) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            description: fields.description.unwrap_or_default(),
            price: clamp_price(fields.price),
            available: fields.available,
        }
    }
}

/// An explicit partial update to a [`Book`].
///
/// Every field is optional; absent fields leave the book untouched. Unknown
/// fields are rejected on deserialization rather than silently merged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl BookPatch {
    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.available.is_none()
    }

    /// Apply the patch in place. The book's id is never touched; a patched
    /// price is clamped non-negative.
    pub fn apply(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(description) = &self.description {
            book.description = description.clone();
        }
        if let Some(price) = self.price {
            book.price = clamp_price(price);
        }
        if let Some(available) = self.available {
            book.available = available;
        }
    }
}

fn clamp_price(price: f64) -> f64 {
    if price.is_sign_negative() || price.is_nan() {
        0.0
    } else {
        price
    }
}
