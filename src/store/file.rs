//! FileStore — file-backed catalog store.
//!
//! The whole catalog lives in one pretty-printed JSON array, rewritten
//! wholesale on every mutation. One coarse mutex guards each full
//! read-mutate-rewrite cycle, so two logical operations never interleave.
//! Writes go to a sibling temp file and rename over the target.
//!
//! ## Example
//!
//! ```ignore
//! use libreria::{FileStore, NewBook};
//!
//! let store = FileStore::open("data/books.json")?;
//! let book = store.add(NewBook {
//!     title: "Sapiens".into(),
//!     author: "Yuval Noah Harari".into(),
//!     category: "Divulgacion".into(),
//!     price: 15.0,
//!     cover: None,
//! })?;
//! assert_eq!(store.get_by_id(book.id)?.unwrap().title, "Sapiens");
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::book::{Book, NewBook};

use super::StoreError;

/// File-backed book repository.
///
/// Cheap to share behind an `Arc`; every operation takes `&self` and
/// serializes internally. The mutex payload is the high-water mark of
/// assigned ids, so ids deleted from the file are never handed out again
/// within the process even when the deleted id was the maximum.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Guards the read-mutate-rewrite cycle; value = highest id ever seen.
    state: Mutex<u64>,
}

impl FileStore {
    /// Open (or create) the catalog file at `path`.
    ///
    /// Parent directories are created as needed and a missing file is
    /// initialized to `[]`, so the on-disk catalog is a valid JSON array
    /// from the moment the store exists. An existing file that does not
    /// parse is reported as [`StoreError::Corrupt`] — startup aborts rather
    /// than guessing at a repair.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        if !path.exists() {
            fs::write(&path, "[]")?;
            debug!(path = %path.display(), "created empty catalog file");
        }
        let list = read_list(&path)?;
        let high_water = list.iter().map(|b| b.id).max().unwrap_or(0);
        Ok(FileStore {
            path,
            state: Mutex::new(high_water),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full catalog in file order.
    pub fn get_all(&self) -> Result<Vec<Book>, StoreError> {
        let _guard = self
            .state
            .lock()
            .map_err(|_| StoreError::LockPoisoned("get_all"))?;
        read_list(&self.path)
    }

    /// Single book by id, `None` if absent.
    pub fn get_by_id(&self, id: u64) -> Result<Option<Book>, StoreError> {
        let _guard = self
            .state
            .lock()
            .map_err(|_| StoreError::LockPoisoned("get_by_id"))?;
        Ok(read_list(&self.path)?.into_iter().find(|b| b.id == id))
    }

    /// Append a new book, assigning the next id.
    ///
    /// The id is `max(existing ids) + 1` (1 for an empty catalog), bumped
    /// past the in-process high-water mark so deleted ids are not reused.
    pub fn add(&self, new: NewBook) -> Result<Book, StoreError> {
        let mut high_water = self
            .state
            .lock()
            .map_err(|_| StoreError::LockPoisoned("add"))?;
        let mut list = read_list(&self.path)?;
        let max_id = list.iter().map(|b| b.id).max().unwrap_or(0);
        let next_id = max_id.max(*high_water) + 1;
        let book = new.into_book(next_id);
        list.push(book.clone());
        write_list(&self.path, &list)?;
        *high_water = next_id;
        debug!(id = book.id, title = %book.title, "added book");
        Ok(book)
    }

    /// Replace the record with the same id. Returns `false` when no record
    /// matches; the catalog is left untouched in that case.
    pub fn update(&self, book: Book) -> Result<bool, StoreError> {
        let _guard = self
            .state
            .lock()
            .map_err(|_| StoreError::LockPoisoned("update"))?;
        let mut list = read_list(&self.path)?;
        let slot = match list.iter_mut().find(|b| b.id == book.id) {
            Some(slot) => slot,
            None => return Ok(false),
        };
        debug!(id = book.id, "updating book");
        *slot = book;
        write_list(&self.path, &list)?;
        Ok(true)
    }

    /// Remove the record with the given id. Returns whether a removal
    /// occurred; removing an absent id leaves the file untouched.
    pub fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let _guard = self
            .state
            .lock()
            .map_err(|_| StoreError::LockPoisoned("delete"))?;
        let mut list = read_list(&self.path)?;
        let before = list.len();
        list.retain(|b| b.id != id);
        if list.len() == before {
            return Ok(false);
        }
        debug!(id, "deleted book");
        write_list(&self.path, &list)?;
        Ok(true)
    }
}

fn read_list(path: &Path) -> Result<Vec<Book>, StoreError> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|err| StoreError::Corrupt {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })
}

fn write_list(path: &Path, list: &[Book]) -> Result<(), StoreError> {
    let json =
        serde_json::to_string_pretty(list).map_err(|err| StoreError::Encode(err.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
