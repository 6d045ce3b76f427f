//! Book endpoints
//!
//! Each handler validates its inputs, makes exactly one store call and
//! renders either the book(s) or a message envelope.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{BookId, ValidBook};
use crate::http::server::AppState;
use crate::models::Book;

/// `{"message": "..."}` envelope for non-entity responses
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /books - list all books, ascending by id
async fn list_books(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.books.list().await?;
    Ok(Json(books))
}

/// GET /books/{id} - get a single book
async fn get_book(
    State(state): State<Arc<AppState>>,
    BookId(id): BookId,
) -> Result<Json<Book>, ApiError> {
    let book = state.books.get(id).await?;
    Ok(Json(book))
}

/// POST /books - create a book
async fn create_book(
    State(state): State<Arc<AppState>>,
    ValidBook(draft): ValidBook,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = state.books.create(draft).await?;
    tracing::info!(id = book.id, "Book added");
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /books/{id} - replace title, author and quantity
async fn update_book(
    State(state): State<Arc<AppState>>,
    BookId(id): BookId,
    ValidBook(draft): ValidBook,
) -> Result<Json<Book>, ApiError> {
    let book = state.books.update(id, draft).await?;
    Ok(Json(book))
}

/// DELETE /books/{id} - delete a book
async fn delete_book(
    State(state): State<Arc<AppState>>,
    BookId(id): BookId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.books.delete(id).await?;
    tracing::info!(id, "Book deleted");
    Ok(Json(MessageResponse {
        message: "book deleted successfully",
    }))
}

/// Book routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
}
