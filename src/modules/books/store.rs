//! Ordered in-memory collection that owns every book record.

use thiserror::Error;

use super::models::Book;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no book with id '{0}'")]
    NotFound(String),
}

/// Books in insertion order. Lookups are linear scans.
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Ids are assumed unique.
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Replace the record with the given id, returning the previous one.
    pub fn replace_at(&mut self, id: &str, book: Book) -> Result<Book, StoreError> {
        let index = self.position(id)?;
        Ok(std::mem::replace(&mut self.books[index], book))
    }

    /// Remove the record with the given id, keeping the order of the rest.
    pub fn remove_by_id(&mut self, id: &str) -> Result<Book, StoreError> {
        let index = self.position(id)?;
        Ok(self.books.remove(index))
    }

    pub fn all(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
