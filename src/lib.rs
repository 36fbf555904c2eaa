mod book;
mod cart;
mod filter;
mod service;
mod store;

pub use book::{Book, NewBook};
pub use cart::{Cart, CartEntry};
pub use filter::{filter_books, fold, FilterState, ALL_CATEGORIES};
pub use service::{CatalogService, ServiceError};
pub use store::{FileStore, StoreError};

// HTTP surface for the catalog API (requires "server" feature)
#[cfg(feature = "server")]
pub mod http;

// Polling sync client (requires "client" feature)
#[cfg(feature = "client")]
pub mod sync;
