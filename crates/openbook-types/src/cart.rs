use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::BookId;

/// The shopping cart: a mapping from book id to a positive quantity.
///
/// Invariant: stored quantities are always ≥ 1. The mutators here are the
/// only way to change the map, and they refuse to retain a zero entry.
/// Serialized transparently as a JSON object (book id → integer), matching
/// the `ob_cart_v1` wire format. `BTreeMap` keeps key order deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: BTreeMap<BookId, u32>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the quantity for `id` by `qty`, inserting the entry if
    /// absent. Adding zero is a no-op (a zero entry would break the
    /// invariant). Quantities saturate rather than overflow.
    pub fn add(&mut self, id: BookId, qty: u32) {
        if qty == 0 {
            return;
        }
        let slot = self.entries.entry(id).or_insert(0);
        *slot = slot.saturating_add(qty);
    }

    /// Remove the entry for `id` entirely, whatever its quantity.
    /// Returns `true` if an entry was present.
    pub fn remove(&mut self, id: &BookId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Quantity for `id`, or `None` if absent. Never returns `Some(0)`.
    pub fn quantity(&self, id: &BookId) -> Option<u32> {
        self.entries.get(id).copied()
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cart holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&BookId, u32)> {
        self.entries.iter().map(|(id, qty)| (id, *qty))
    }
}
