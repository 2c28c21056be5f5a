//! Validation and store access for the five book operations.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{Book, BookFilter, BookPayload, BookSummary};
use super::providers::{Clock, IdGenerator};
use super::store::{BookStore, StoreError};

/// The mutating operation a failure message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Action::Add => "add",
            Action::Update => "update",
            Action::Delete => "delete",
        };
        write!(f, "Failed to {verb} book.")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    #[error("{0} Please provide the book name")]
    MissingName(Action),

    #[error("{0} readPage must not be greater than pageCount")]
    ReadPageExceedsPageCount(Action),

    #[error("Book not found")]
    NotFound,

    #[error("{0} Id not found")]
    IdNotFound(Action),

    /// The appended record could not be read back.
    #[error("{}", Action::Add)]
    NotPersisted,
}

/// Snapshots returned by an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookUpdate {
    pub before: Book,
    pub after: Book,
}

/// Owns the book store behind a single lock.
///
/// Each operation holds the lock for its whole lookup-and-mutate sequence, so
/// concurrent requests observe the same serial order a single worker would.
pub struct BookService {
    store: RwLock<BookStore>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl BookService {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RwLock::new(BookStore::new()),
            ids,
            clock,
        }
    }

    /// Validate and append a new book, returning its id.
    pub async fn create(&self, payload: BookPayload) -> Result<String, BookError> {
        let name = validate(&payload, Action::Add)?.to_string();

        let id = self.ids.next_id();
        let now = self.clock.now();
        let book = Book {
            id: id.clone(),
            name,
            year: payload.year,
            finished: payload.is_finished(),
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        };

        let mut store = self.store.write().await;
        store.add(book);

        if store.find_by_id(&id).is_none() {
            return Err(BookError::NotPersisted);
        }

        Ok(id)
    }

    /// Projections of every book matching `filter`, in insertion order.
    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        let store = self.store.read().await;
        store
            .all()
            .iter()
            .filter(|book| filter.matches(book))
            .map(BookSummary::from)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Book, BookError> {
        let store = self.store.read().await;
        store.find_by_id(id).cloned().ok_or(BookError::NotFound)
    }

    /// Replace every mutable field of the book, keeping `id` and `inserted_at`.
    pub async fn edit(&self, id: &str, payload: BookPayload) -> Result<BookUpdate, BookError> {
        let name = validate(&payload, Action::Update)?.to_string();

        let mut store = self.store.write().await;
        let inserted_at = store
            .find_by_id(id)
            .map(|book| book.inserted_at)
            .ok_or(BookError::IdNotFound(Action::Update))?;

        let after = Book {
            id: id.to_string(),
            name,
            year: payload.year,
            finished: payload.is_finished(),
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            reading: payload.reading,
            inserted_at,
            updated_at: self.clock.now(),
        };

        let before = store
            .replace_at(id, after.clone())
            .map_err(|StoreError::NotFound(_)| BookError::IdNotFound(Action::Update))?;

        Ok(BookUpdate { before, after })
    }

    /// Remove a book, returning the removed record.
    pub async fn delete(&self, id: &str) -> Result<Book, BookError> {
        let mut store = self.store.write().await;
        store
            .remove_by_id(id)
            .map_err(|StoreError::NotFound(_)| BookError::IdNotFound(Action::Delete))
    }

    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }
}

/// Name presence first, then the page invariant.
fn validate(payload: &BookPayload, action: Action) -> Result<&str, BookError> {
    let name = payload.name().ok_or(BookError::MissingName(action))?;

    if payload.read_page > payload.page_count {
        return Err(BookError::ReadPageExceedsPageCount(action));
    }

    Ok(name)
}
