//! Loan (borrow) model and related types

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Identifies the loan of one book to one reader.
///
/// Used both to open a loan and to close the open one; at most one open loan per
/// pair is expected, though nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoanKey {
    pub reader_id: i32,
    pub book_id: i32,
}

/// Loan history line: a borrow record joined with its book
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct LoanRecord {
    pub book_id: i32,
    pub title: String,
    pub borrowed_at: NaiveDateTime,
    pub returned_at: Option<NaiveDateTime>,
}

impl LoanRecord {
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }
}
