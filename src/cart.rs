//! Cart aggregator — local quantities of selected books.
//!
//! The cart is decoupled from catalog refreshes: a stored book is a snapshot
//! at time of first add and is never re-synced from later catalog state.
//! That staleness is accepted, not a bug to fix here.

use std::collections::BTreeMap;

use crate::book::Book;

/// A cart line: the book as it looked when first added, plus a quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub book: Book,
    pub qty: u32,
}

/// Mapping from book id to [`CartEntry`], iterated in id order.
///
/// All operations are synchronous and infallible — absent ids are no-ops,
/// not errors.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: BTreeMap<u64, CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Add one copy of `book`: bump the quantity of an existing entry, or
    /// insert a new entry with quantity 1. An existing entry keeps the book
    /// it was first added with.
    pub fn add(&mut self, book: Book) {
        self.entries
            .entry(book.id)
            .and_modify(|e| e.qty += 1)
            .or_insert(CartEntry { book, qty: 1 });
    }

    /// Drop the entry for `id` if present.
    pub fn remove(&mut self, id: u64) {
        self.entries.remove(&id);
    }

    /// Set the quantity for `id`. A quantity of zero or less removes the
    /// entry; otherwise the quantity is replaced and the stored book is
    /// left unchanged.
    pub fn set_quantity(&mut self, id: u64, qty: i64) {
        if qty <= 0 {
            self.remove(id);
        } else if let Some(entry) = self.entries.get_mut(&id) {
            entry.qty = qty as u32;
        }
    }

    pub fn get(&self, id: u64) -> Option<&CartEntry> {
        self.entries.get(&id)
    }

    /// Entries in ascending id order.
    pub fn entries(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of `price × qty` over all entries, computed fresh on every call.
    pub fn total(&self) -> f64 {
        self.entries
            .values()
            .map(|e| e.book.price * f64::from(e.qty))
            .sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
