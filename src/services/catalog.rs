//! Catalog management service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Book, BookQuery, CreateBook, Session, UpdateBook},
    policy::{self, Action},
    repository::LibraryStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn LibraryStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    /// Add a book to the catalog, returning its id.
    /// Fields are not validated; the backend has the last word.
    pub async fn add_book(&self, session: &Session, book: &CreateBook) -> AppResult<u64> {
        policy::authorize(session, Action::AddBook)?;

        let book_id = self.store.create_book(book).await?;
        tracing::info!(book_id, title = %book.title, user = session.username(), "Book added");
        Ok(book_id)
    }

    /// Delete a book by id. Returns the number of rows removed, zero when the id
    /// does not exist, which is still a success.
    pub async fn delete_book(&self, session: &Session, book_id: i32) -> AppResult<u64> {
        policy::authorize(session, Action::DeleteBook)?;

        let deleted = self.store.delete_book(book_id).await?;
        tracing::info!(book_id, deleted, user = session.username(), "Book deleted");
        Ok(deleted)
    }

    /// Change title and publisher of a book. Same zero-row semantics as delete.
    pub async fn update_book(&self, session: &Session, update: &UpdateBook) -> AppResult<u64> {
        policy::authorize(session, Action::UpdateBook)?;

        let updated = self.store.update_book(update).await?;
        tracing::info!(book_id = update.book_id, updated, user = session.username(), "Book updated");
        Ok(updated)
    }

    /// Search books by title keyword
    pub async fn search_books(&self, session: &Session, query: &BookQuery) -> AppResult<Vec<Book>> {
        policy::authorize(session, Action::SearchBooks)?;

        let books = self.store.search_books(query).await?;
        tracing::debug!(keyword = ?query.effective_keyword(), found = books.len(), "Catalog search");
        Ok(books)
    }
}
