//! Ingestion normalization for raw catalog payloads.
//!
//! The backend serves records with inconsistent field casing (`title` or
//! `Title`, and so on for every attribute). An explicit alias table maps
//! each canonical field to its accepted source spellings, the lower-case
//! form winning when both appear; past this boundary only canonical field
//! names exist.

use serde_json::{Map, Value};

use crate::book::Book;

/// Placeholder image used when a record carries no usable cover.
const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/120x160";

/// Fallback text for the placeholder when the title itself is empty.
const PLACEHOLDER_TEXT: &str = "Book";

/// Backends that echo their schema example emit the literal string
/// `"string"` as the cover value; treat it the same as no cover at all.
const COVER_SENTINEL: &str = "string";

// Canonical field → accepted source fields, in preference order.
const ID_FIELDS: [&str; 2] = ["id", "Id"];
const TITLE_FIELDS: [&str; 2] = ["title", "Title"];
const AUTHOR_FIELDS: [&str; 2] = ["author", "Author"];
const CATEGORY_FIELDS: [&str; 2] = ["category", "Category"];
const PRICE_FIELDS: [&str; 2] = ["price", "Price"];
const COVER_FIELDS: [&str; 2] = ["cover", "Cover"];

fn field<'a>(record: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| record.get(*name))
}

fn string_field(record: &Map<String, Value>, names: &[&str]) -> String {
    field(record, names)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Price coerced to a non-negative number; missing or unparseable is 0.
fn price_field(record: &Map<String, Value>) -> f64 {
    let price = match field(record, &PRICE_FIELDS) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    price.max(0.0)
}

fn placeholder_cover(title: &str) -> String {
    let text = if title.trim().is_empty() {
        PLACEHOLDER_TEXT
    } else {
        title
    };
    format!("{}?text={}", PLACEHOLDER_BASE, text.replace(' ', "+"))
}

/// Normalize one raw record; `None` when it carries no usable id.
fn normalize_book(value: &Value) -> Option<Book> {
    let record = value.as_object()?;
    let id = field(record, &ID_FIELDS)?.as_u64()?;
    let title = string_field(record, &TITLE_FIELDS);
    let cover = match field(record, &COVER_FIELDS).and_then(Value::as_str) {
        Some(url) if !url.is_empty() && url != COVER_SENTINEL => url.to_string(),
        _ => placeholder_cover(&title),
    };
    Some(Book {
        id,
        author: string_field(record, &AUTHOR_FIELDS),
        category: string_field(record, &CATEGORY_FIELDS),
        price: price_field(record),
        cover: Some(cover),
        title,
    })
}

/// Normalize a whole payload. A non-array payload normalizes to an empty
/// list; records without a usable id are dropped.
pub fn normalize_books(payload: &Value) -> Vec<Book> {
    payload
        .as_array()
        .map(|items| items.iter().filter_map(normalize_book).collect())
        .unwrap_or_default()
}
