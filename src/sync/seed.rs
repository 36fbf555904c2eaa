//! Embedded seed catalog — the fallback when the backend is unreachable.

use crate::book::Book;

/// Fixed, hard-coded records the sync client installs on any fetch failure,
/// so a consumer always has something to render. Never fetched.
pub fn seed_catalog() -> Vec<Book> {
    vec![
        Book {
            id: 1,
            title: "El alquimista".into(),
            author: "Paulo Coelho".into(),
            category: "Ficcion".into(),
            price: 9.99,
            cover: Some("https://via.placeholder.com/120x160?text=Alquimista".into()),
        },
        Book {
            id: 2,
            title: "Cien años de soledad".into(),
            author: "Gabriel García Marquez".into(),
            category: "Clasicos".into(),
            price: 12.5,
            cover: Some("https://via.placeholder.com/120x160?text=Cien+Años".into()),
        },
        Book {
            id: 3,
            title: "Sapiens".into(),
            author: "Yuval Noah Harari".into(),
            category: "Divulgacion".into(),
            price: 15.0,
            cover: Some("https://via.placeholder.com/120x160?text=Sapiens".into()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_non_empty_with_unique_ids_and_covers() {
        let seed = seed_catalog();
        assert!(!seed.is_empty());
        for (i, book) in seed.iter().enumerate() {
            assert!(book.price >= 0.0);
            assert!(book.cover.is_some());
            assert!(seed[i + 1..].iter().all(|other| other.id != book.id));
        }
    }
}
