//! Book — the catalog record.

use serde::{Deserialize, Serialize};

/// A catalog record. Identity is `id`; updates replace the whole record,
/// there are no partial/merge semantics.
///
/// The serialized form uses these exact lower-case field names — both in the
/// persisted catalog file and on the wire. Missing `price` defaults to 0 and
/// a missing `cover` stays absent; alternate field casings are tolerated only
/// at the sync ingestion boundary, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

/// A book as submitted for creation — the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

impl NewBook {
    pub(crate) fn into_book(self, id: u64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            category: self.category,
            price: self.price,
            cover: self.cover,
        }
    }
}
