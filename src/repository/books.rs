//! Books repository for database operations

use sqlx::{MySql, Pool};

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBook, UpdateBook, LIKE_ESCAPE},
};

const SELECT_BOOKS: &str = r#"
    SELECT bookId AS book_id,
           bookName AS title,
           COALESCE(publisher, '') AS publisher,
           COALESCE(CAST(publicationDate AS CHAR), '') AS publication_date,
           bookrackId AS bookshelf_id,
           roomId AS room_id
    FROM books
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<MySql>,
}

impl BooksRepository {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    /// Search books by title; a blank keyword lists the whole catalog
    pub async fn search(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let pattern = query.title_pattern();
        let where_clause = if pattern.is_some() {
            format!("WHERE bookName LIKE ? ESCAPE '{}'", LIKE_ESCAPE)
        } else {
            String::new()
        };
        let select_query = format!("{} {} ORDER BY bookId", SELECT_BOOKS, where_clause);

        let mut builder = sqlx::query_as::<_, Book>(&select_query);
        if let Some(pattern) = pattern {
            builder = builder.bind(pattern);
        }
        let books = builder.fetch_all(&self.pool).await?;

        Ok(books)
    }

    /// Create a new book, returning the generated id
    pub async fn create(&self, book: &CreateBook) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (bookName, publicationDate, publisher, bookrackId, roomId)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&book.title)
        .bind(&book.publication_date)
        .bind(&book.publisher)
        .bind(book.bookshelf_id)
        .bind(book.room_id)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id())
    }

    /// Update title and publisher
    pub async fn update(&self, book: &UpdateBook) -> AppResult<u64> {
        let result = sqlx::query("UPDATE books SET bookName = ?, publisher = ? WHERE bookId = ?")
            .bind(&book.title)
            .bind(&book.publisher)
            .bind(book.book_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete a book. Loans referencing it are left to the schema's constraints.
    pub async fn delete(&self, book_id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE bookId = ?")
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
