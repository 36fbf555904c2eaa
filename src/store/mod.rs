//! Catalog store — file-backed repository for the book list.

mod error;
mod file;

pub use error::StoreError;
pub use file::FileStore;
