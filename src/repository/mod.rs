//! Repository layer for database operations
//!
//! Every statement is sent with `?` placeholders and bound arguments. The pool
//! holds a single connection: each call checks it out for one statement and
//! gives it back when the future completes, whether it succeeded or not.

pub mod books;
pub mod loans;
pub mod users;


use std::time::Duration;

use async_trait::async_trait;
use sqlx::{mysql::MySqlPoolOptions, MySql, Pool};

use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    models::{Book, BookQuery, CreateBook, LoanKey, LoanRecord, UpdateBook, User},
};

/// Everything the services need from the backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Account whose username and password both match, if any
    async fn find_user_by_credentials(&self, username: &str, password: &str) -> AppResult<Option<User>>;

    /// Insert a book and return its generated id
    async fn create_book(&self, book: &CreateBook) -> AppResult<u64>;

    /// Change title and publisher; returns the number of rows changed
    async fn update_book(&self, book: &UpdateBook) -> AppResult<u64>;

    /// Remove a book by id; returns the number of rows removed
    async fn delete_book(&self, book_id: i32) -> AppResult<u64>;

    async fn search_books(&self, query: &BookQuery) -> AppResult<Vec<Book>>;

    /// Open a loan stamped with the backend's current time
    async fn create_loan(&self, key: LoanKey) -> AppResult<()>;

    /// Close the open loan(s) for the pair; returns the number of rows closed
    async fn close_loan(&self, key: LoanKey) -> AppResult<u64>;

    async fn loan_history(&self, reader_id: i32) -> AppResult<Vec<LoanRecord>>;
}

/// Open the connection used for the whole run
pub async fn connect(config: &DatabaseConfig) -> AppResult<Pool<MySql>> {
    MySqlPoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(AppError::Connection)
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<MySql>,
    pub users: users::UsersRepository,
    pub books: books::BooksRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<MySql>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            pool,
        }
    }

    /// Disconnect from the backend
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl LibraryStore for Repository {
    async fn find_user_by_credentials(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        self.users.get_by_credentials(username, password).await
    }

    async fn create_book(&self, book: &CreateBook) -> AppResult<u64> {
        self.books.create(book).await
    }

    async fn update_book(&self, book: &UpdateBook) -> AppResult<u64> {
        self.books.update(book).await
    }

    async fn delete_book(&self, book_id: i32) -> AppResult<u64> {
        self.books.delete(book_id).await
    }

    async fn search_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.books.search(query).await
    }

    async fn create_loan(&self, key: LoanKey) -> AppResult<()> {
        self.loans.create(key).await
    }

    async fn close_loan(&self, key: LoanKey) -> AppResult<u64> {
        self.loans.close(key).await
    }

    async fn loan_history(&self, reader_id: i32) -> AppResult<Vec<LoanRecord>> {
        self.loans.get_reader_history(reader_id).await
    }
}
