//! Loans repository for database operations

use sqlx::{MySql, Pool};

use crate::{
    error::AppResult,
    models::loan::{LoanKey, LoanRecord},
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<MySql>,
}

impl LoansRepository {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    /// Create a new loan, borrowed now and not yet returned
    pub async fn create(&self, key: LoanKey) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO borrow (browBookId, bookId, borrowDate, returnDate)
            VALUES (?, ?, NOW(), NULL)
            "#,
        )
        .bind(key.reader_id)
        .bind(key.book_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Stamp the return time on the open loan(s) of this reader for this book
    pub async fn close(&self, key: LoanKey) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE borrow SET returnDate = NOW()
            WHERE browBookId = ? AND bookId = ? AND returnDate IS NULL
            "#,
        )
        .bind(key.reader_id)
        .bind(key.book_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Get every loan of a reader, returned or not, oldest first
    pub async fn get_reader_history(&self, reader_id: i32) -> AppResult<Vec<LoanRecord>> {
        let records = sqlx::query_as::<_, LoanRecord>(
            r#"
            SELECT b.bookId AS book_id, bk.bookName AS title,
                   b.borrowDate AS borrowed_at, b.returnDate AS returned_at
            FROM borrow b
            JOIN books bk ON b.bookId = bk.bookId
            WHERE b.browBookId = ?
            ORDER BY b.borrowDate, b.bookId
            "#,
        )
        .bind(reader_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
