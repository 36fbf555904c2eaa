//! HTTP surface for the catalog API — maps routes onto the catalog service.
//!
//! Requires the `server` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /api/books` — all books; `?title=` narrows by title substring.
//! - `GET /api/books/:id` — one book, 404 if absent.
//! - `GET /api/categories` — distinct category names; with `?name=`,
//!   the books whose category contains `name` instead.
//! - `POST /api/books` — create (201 + `Location`), 400 on a blank title.
//! - `PUT /api/books/:id` — replace (204), 400 on id mismatch, 404 if absent.
//! - `DELETE /api/books/:id` — remove (204), 404 if absent.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use libreria::{http, CatalogService, FileStore};
//!
//! let store = Arc::new(FileStore::open("data/books.json")?);
//! let service = Arc::new(CatalogService::new(store));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::book::{Book, NewBook};
use crate::service::{CatalogService, ServiceError};

/// Build an axum `Router` serving the catalog API.
pub fn router(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/books", get(list_books).post(create_book))
        .route(
            "/api/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/categories", get(categories))
        .with_state(service)
}

/// Serve the catalog API at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve(service: Arc<CatalogService>, addr: &str) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryQuery {
    name: Option<String>,
}

async fn list_books(
    State(service): State<Arc<CatalogService>>,
    Query(query): Query<ListQuery>,
) -> Response {
    match service.list(query.title.as_deref()) {
        Ok(books) => Json(books).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_book(State(service): State<Arc<CatalogService>>, Path(id): Path<u64>) -> Response {
    match service.get(id) {
        Ok(Some(book)) => Json(book).into_response(),
        Ok(None) => error_response(ServiceError::NotFound),
        Err(err) => error_response(err),
    }
}

async fn create_book(
    State(service): State<Arc<CatalogService>>,
    Json(new): Json<NewBook>,
) -> Response {
    match service.create(new) {
        Ok(book) => {
            let location = format!("/api/books/{}", book.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(book),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn update_book(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
    Json(book): Json<Book>,
) -> Response {
    match service.update(id, book) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

async fn delete_book(State(service): State<Arc<CatalogService>>, Path(id): Path<u64>) -> Response {
    match service.delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

/// Without `name`: the distinct category strings. With `name`: the books
/// whose category contains it.
async fn categories(
    State(service): State<Arc<CatalogService>>,
    Query(query): Query<CategoryQuery>,
) -> Response {
    let result = match query.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        None => service.categories().map(|cats| Json(cats).into_response()),
        Some(name) => service
            .books_in_category(name)
            .map(|books| Json(books).into_response()),
    };
    result.unwrap_or_else(error_response)
}

fn error_response(err: ServiceError) -> Response {
    let status = match &err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
