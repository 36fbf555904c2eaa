//! Filter engine — canonical text folding and catalog filtering.
//!
//! A pure function of `(books, query, category)`. The query match is
//! "canonical query is a substring of canonical title" where the canonical
//! form strips diacritics and case; the category match is exact unless the
//! selection is the [`ALL_CATEGORIES`] sentinel. Both filters AND together
//! and the input order is preserved.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::book::Book;

/// Reserved category value meaning "no category filter applied".
pub const ALL_CATEGORIES: &str = "All";

/// Fold a string to its canonical comparable form: NFD-decompose, drop the
/// combining marks, lower-case what remains. Used only for comparison,
/// never stored or displayed.
pub fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Derive the visible subset of `books` for a free-text query and a category
/// selection. An empty query and the sentinel (or empty) category each act
/// as a pass-through.
pub fn filter_books<'a>(books: &'a [Book], query: &str, category: &str) -> Vec<&'a Book> {
    let needle = fold(query.trim());
    let all_categories = category.is_empty() || category == ALL_CATEGORIES;
    books
        .iter()
        .filter(|b| needle.is_empty() || fold(&b.title).contains(&needle))
        .filter(|b| all_categories || b.category == category)
        .collect()
}

/// Memo key for a derived view of the catalog.
///
/// A view computed for one `FilterState` must be recomputed whenever the
/// query, the category, or the snapshot epoch moves on. Comparing the epoch
/// rather than the book content is deliberate: a refresh can change derived
/// data (cover placeholders, category list) without changing the books
/// structurally, and such refreshes must still re-filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub category: String,
    pub epoch: u64,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
            epoch: 0,
        }
    }
}

impl FilterState {
    /// True when a view computed for this state is stale for the given
    /// inputs.
    pub fn needs_refilter(&self, query: &str, category: &str, epoch: u64) -> bool {
        self.query != query || self.category != category || self.epoch != epoch
    }

    /// Record the inputs a view was just computed for.
    pub fn advance(&mut self, query: &str, category: &str, epoch: u64) {
        self.query = query.to_string();
        self.category = category.to_string();
        self.epoch = epoch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: u64, title: &str, category: &str) -> Book {
        Book {
            id,
            title: title.into(),
            author: String::new(),
            category: category.into(),
            price: 0.0,
            cover: None,
        }
    }

    #[test]
    fn fold_strips_diacritics_and_case() {
        assert_eq!(fold("Niño"), "nino");
        assert_eq!(fold("Ñi"), "ni");
        assert_eq!(fold("Cien años de soledad"), "cien anos de soledad");
    }

    #[test]
    fn accented_query_matches_accented_title() {
        let books = [book(1, "Niño", "Ficcion")];
        assert_eq!(filter_books(&books, "Ñi", ALL_CATEGORIES).len(), 1);
        assert!(filter_books(&books, "xyz", ALL_CATEGORIES).is_empty());
    }

    #[test]
    fn query_and_category_are_anded() {
        let books = [book(1, "El alquimista", "Ficcion")];
        let hits = filter_books(&books, "alqui", ALL_CATEGORIES);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
        assert!(filter_books(&books, "alqui", "Clasicos").is_empty());
    }

    #[test]
    fn empty_inputs_pass_everything_in_order() {
        let books = [
            book(1, "A", "x"),
            book(2, "B", "y"),
            book(3, "C", "x"),
        ];
        let all = filter_books(&books, "", "");
        assert_eq!(all.iter().map(|b| b.id).collect::<Vec<_>>(), [1, 2, 3]);
        let xs = filter_books(&books, "", "x");
        assert_eq!(xs.iter().map(|b| b.id).collect::<Vec<_>>(), [1, 3]);
    }

    #[test]
    fn epoch_change_alone_forces_refilter() {
        let mut state = FilterState::default();
        state.advance("q", ALL_CATEGORIES, 1);
        assert!(!state.needs_refilter("q", ALL_CATEGORIES, 1));
        assert!(state.needs_refilter("q", ALL_CATEGORIES, 2));
        assert!(state.needs_refilter("q2", ALL_CATEGORIES, 1));
    }
}
