//! HTTP handlers for `/books`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use bookshelf_http::{AppError, AppResult, Envelope, Reply};
use serde::Serialize;

use super::models::{Book, BookFilter, BookPayload, BookSummary};
use super::service::{BookError, BookService, BookUpdate};

impl From<BookError> for AppError {
    fn from(error: BookError) -> Self {
        let message = error.to_string();
        match error {
            BookError::MissingName(_) | BookError::ReadPageExceedsPageCount(_) => {
                AppError::bad_request(message)
            }
            BookError::NotFound | BookError::IdNotFound(_) => AppError::not_found(message),
            BookError::NotPersisted => AppError::internal(message),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookCreated {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct BookDetail {
    pub book: Book,
}

/// Routes for the books collection, bound to `service`
pub fn router(service: Arc<BookService>) -> Router {
    Router::new()
        .route("/books", get(list_books).post(add_book))
        .route(
            "/books/{book_id}",
            get(get_book).put(edit_book).delete(delete_book),
        )
        .with_state(service)
}

async fn add_book(
    State(service): State<Arc<BookService>>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<Reply<BookCreated>> {
    let Json(payload) = payload?;
    let book_id = service.create(payload).await?;

    tracing::info!(book_id = %book_id, "book added");

    Ok(Reply::created(
        Envelope::success(BookCreated { book_id }).with_message("Book added successfully"),
    ))
}

async fn list_books(
    State(service): State<Arc<BookService>>,
    query: Result<Query<super::models::ListQuery>, QueryRejection>,
) -> AppResult<Reply<BookList>> {
    let Query(query) = query?;
    let filter = BookFilter::from(query);
    let books = service.list(&filter).await;

    tracing::debug!(count = books.len(), ?filter, "books listed");

    Ok(Reply::ok(Envelope::success(BookList { books })))
}

async fn get_book(
    State(service): State<Arc<BookService>>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Reply<BookDetail>> {
    let Path(book_id) = path?;
    let book = service.get(&book_id).await?;
    Ok(Reply::ok(Envelope::success(BookDetail { book })))
}

async fn edit_book(
    State(service): State<Arc<BookService>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<Reply<BookUpdate>> {
    let Path(book_id) = path?;
    let Json(payload) = payload?;
    let update = service.edit(&book_id, payload).await?;

    tracing::info!(book_id = %book_id, "book updated");

    Ok(Reply::ok(
        Envelope::success(update).with_message("Book updated successfully"),
    ))
}

async fn delete_book(
    State(service): State<Arc<BookService>>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Reply> {
    let Path(book_id) = path?;
    service.delete(&book_id).await?;

    tracing::info!(book_id = %book_id, "book deleted");

    Ok(Reply::ok(Envelope::success_message("Book deleted successfully")))
}
