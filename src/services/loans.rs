//! Loan management service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{LoanKey, LoanRecord, Session},
    policy::{self, Action},
    repository::LibraryStore,
};

#[derive(Clone)]
pub struct LoansService {
    store: Arc<dyn LibraryStore>,
}

impl LoansService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    /// Record that a reader took a book.
    ///
    /// Whether the reader and book exist, or the book is already out, is left to
    /// the schema; a violation comes back as a statement error.
    pub async fn borrow_book(&self, session: &Session, key: LoanKey) -> AppResult<()> {
        policy::authorize(session, Action::BorrowBook)?;

        self.store.create_loan(key).await?;
        tracing::info!(reader_id = key.reader_id, book_id = key.book_id, user = session.username(), "Loan recorded");
        Ok(())
    }

    /// Record a return. Returns how many open loans were closed; zero is not an error.
    pub async fn return_book(&self, session: &Session, key: LoanKey) -> AppResult<u64> {
        policy::authorize(session, Action::ReturnBook)?;

        let closed = self.store.close_loan(key).await?;
        if closed == 0 {
            tracing::warn!(reader_id = key.reader_id, book_id = key.book_id, "Return recorded but no open loan matched");
        } else {
            tracing::info!(reader_id = key.reader_id, book_id = key.book_id, closed, user = session.username(), "Return recorded");
        }
        Ok(closed)
    }

    /// Get the loans of any reader id typed at the console
    pub async fn loan_history(&self, session: &Session, reader_id: i32) -> AppResult<Vec<LoanRecord>> {
        policy::authorize(session, Action::LoanHistory)?;

        if reader_id != session.user_id() {
            tracing::debug!(reader_id, user = session.username(), "Loan history requested for another reader");
        }
        self.store.loan_history(reader_id).await
    }
}
