//! HTTP API integration tests.
//!
//! Starts the axum router over a temp-dir store and exercises every route
//! with reqwest.

use std::sync::Arc;

use libreria::http;
use libreria::{Book, CatalogService, FileStore};
use serde_json::json;
use tempfile::TempDir;

/// Bind to port 0 and return the base URL plus the temp dir keeping the
/// catalog file alive.
async fn start_server() -> (String, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::open(dir.path().join("books.json")).unwrap());
    let service = Arc::new(CatalogService::new(store));
    let app = http::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), dir)
}

async fn create(
    client: &reqwest::Client,
    base: &str,
    title: &str,
    category: &str,
    price: f64,
) -> reqwest::Response {
    client
        .post(format!("{base}/api/books"))
        .json(&json!({
            "title": title,
            "author": "Author",
            "category": category,
            "price": price,
        }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn create_returns_201_with_location_and_assigned_id() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = create(&client, &base, "El alquimista", "Ficcion", 9.99).await;
    assert_eq!(resp.status(), 201);
    assert_eq!(
        resp.headers()["location"].to_str().unwrap(),
        "/api/books/1"
    );
    let created: Book = resp.json().await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "El alquimista");

    let fetched: Book = client
        .get(format!("{base}/api/books/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_with_blank_title_returns_400() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = create(&client, &base, "   ", "Ficcion", 1.0).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "title required");
}

#[tokio::test]
async fn list_filters_by_title_substring_case_insensitively() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();
    create(&client, &base, "El alquimista", "Ficcion", 9.99).await;
    create(&client, &base, "Sapiens", "Divulgacion", 15.0).await;

    let all: Vec<Book> = client
        .get(format!("{base}/api/books"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let hits: Vec<Book> = client
        .get(format!("{base}/api/books?title=ALQUI"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "El alquimista");
}

#[tokio::test]
async fn get_unknown_id_returns_404() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/books/42"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn put_replaces_and_enforces_id_match() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();
    create(&client, &base, "before", "Ficcion", 5.0).await;

    let replacement = json!({
        "id": 1,
        "title": "after",
        "author": "Someone Else",
        "category": "Clasicos",
        "price": 7.5,
    });
    let resp = client
        .put(format!("{base}/api/books/1"))
        .json(&replacement)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let fetched: Book = client
        .get(format!("{base}/api/books/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched.title, "after");
    assert_eq!(fetched.category, "Clasicos");

    // Path id and body id must agree.
    let resp = client
        .put(format!("{base}/api/books/2"))
        .json(&replacement)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Unknown id is 404, not an upsert.
    let resp = client
        .put(format!("{base}/api/books/9"))
        .json(&json!({ "id": 9, "title": "x", "author": "y", "category": "z", "price": 0.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_returns_204_then_404() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();
    create(&client, &base, "a", "Ficcion", 1.0).await;

    let resp = client
        .delete(format!("{base}/api/books/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .delete(format!("{base}/api/books/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn categories_lists_distinct_names_or_books_by_substring() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();
    create(&client, &base, "a", "Ficcion", 1.0).await;
    create(&client, &base, "b", "Clasicos", 1.0).await;
    create(&client, &base, "c", "Ficcion", 1.0).await;

    let names: Vec<String> = client
        .get(format!("{base}/api/categories"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(names, ["Clasicos", "Ficcion"]);

    let books: Vec<Book> = client
        .get(format!("{base}/api/categories?name=ficc"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(books.len(), 2);
    assert!(books.iter().all(|b| b.category == "Ficcion"));
}
