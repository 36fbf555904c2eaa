//! CatalogService — thin validation layer over the file store.
//!
//! Rejects malformed writes before they reach the store and computes the
//! derived views the API serves (distinct categories, substring filters).
//! Errors map 1:1 to HTTP statuses in the `http` module; there are no
//! internal retries.

use std::sync::Arc;

use crate::book::{Book, NewBook};
use crate::store::FileStore;

use super::ServiceError;

pub struct CatalogService {
    store: Arc<FileStore>,
}

impl CatalogService {
    pub fn new(store: Arc<FileStore>) -> Self {
        CatalogService { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &Arc<FileStore> {
        &self.store
    }

    /// All books, optionally narrowed to titles containing `title`
    /// (case-insensitive, no diacritic folding server-side).
    pub fn list(&self, title: Option<&str>) -> Result<Vec<Book>, ServiceError> {
        let books = self.store.get_all()?;
        match title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(needle) => {
                let needle = needle.to_lowercase();
                Ok(books
                    .into_iter()
                    .filter(|b| b.title.to_lowercase().contains(&needle))
                    .collect())
            }
            None => Ok(books),
        }
    }

    pub fn get(&self, id: u64) -> Result<Option<Book>, ServiceError> {
        Ok(self.store.get_by_id(id)?)
    }

    /// Create a book. Rejects a blank title.
    pub fn create(&self, new: NewBook) -> Result<Book, ServiceError> {
        if new.title.trim().is_empty() {
            return Err(ServiceError::Validation("title required".into()));
        }
        Ok(self.store.add(new)?)
    }

    /// Replace the book with id `id`. Rejects a path/body id mismatch and
    /// reports `NotFound` for an unknown id.
    pub fn update(&self, id: u64, book: Book) -> Result<(), ServiceError> {
        if id != book.id {
            return Err(ServiceError::Validation("id mismatch".into()));
        }
        if self.store.update(book)? {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }

    pub fn delete(&self, id: u64) -> Result<(), ServiceError> {
        if self.store.delete(id)? {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }

    /// Distinct non-empty category names, sorted.
    pub fn categories(&self) -> Result<Vec<String>, ServiceError> {
        let mut categories: Vec<String> = self
            .store
            .get_all()?
            .into_iter()
            .map(|b| b.category)
            .filter(|c| !c.trim().is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    /// Books whose category contains `name`, case-insensitively.
    pub fn books_in_category(&self, name: &str) -> Result<Vec<Book>, ServiceError> {
        let needle = name.to_lowercase();
        Ok(self
            .store
            .get_all()?
            .into_iter()
            .filter(|b| {
                !b.category.trim().is_empty() && b.category.to_lowercase().contains(&needle)
            })
            .collect())
    }
}
