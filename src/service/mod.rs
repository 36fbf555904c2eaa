//! Catalog service — validation layer over the store plus derived views.

mod catalog;
mod error;

pub use catalog::CatalogService;
pub use error::ServiceError;
