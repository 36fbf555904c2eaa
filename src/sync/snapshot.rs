use crate::book::Book;
use crate::filter::ALL_CATEGORIES;

/// An immutable full copy of the catalog as of one completed refresh.
///
/// `epoch` increments exactly once per refresh (success or fallback) and is
/// what downstream views key recomputation on — "did I fetch again" rather
/// than "did the data differ".
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub books: Vec<Book>,
    /// The [`ALL_CATEGORIES`] sentinel followed by the distinct non-empty
    /// categories in order of first appearance.
    pub categories: Vec<String>,
    pub epoch: u64,
}

impl CatalogSnapshot {
    /// Build a snapshot from already-normalized books, deriving the
    /// category list.
    pub fn new(books: Vec<Book>, epoch: u64) -> Self {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for book in &books {
            if !book.category.is_empty() && !categories[1..].contains(&book.category) {
                categories.push(book.category.clone());
            }
        }
        CatalogSnapshot {
            books,
            categories,
            epoch,
        }
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        CatalogSnapshot::new(Vec::new(), 0)
    }
}
