//! Database integration tests
//!
//! These need a MySQL database with the library schema (`users`, `books`,
//! `borrow`). Point `DATABASE_URL` at it and run: cargo test -- --ignored

use std::sync::Arc;

use sqlx::{MySql, Pool};

use stacks_console::{
    config::DatabaseConfig,
    models::{BookQuery, CreateBook, Credentials, LoanKey, Role, Session, UpdateBook},
    repository::{self, Repository},
    services::Services,
    AppError,
};

struct Fixture {
    pool: Pool<MySql>,
    services: Services,
    tag: String,
}

impl Fixture {
    async fn new() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = repository::connect(&DatabaseConfig {
            url,
            connect_timeout_secs: 10,
        })
        .await
        .expect("Failed to connect to database");
        let services = Services::new(Arc::new(Repository::new(pool.clone())));
        let tag = format!("it{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default());
        Self { pool, services, tag }
    }

    /// Insert an account and log it in
    async fn session(&self, role: &str) -> Session {
        let username = format!("{}_{}", self.tag, role);
        sqlx::query("INSERT INTO users (username, password, role) VALUES (?, ?, ?)")
            .bind(&username)
            .bind("pw")
            .bind(role)
            .execute(&self.pool)
            .await
            .expect("Failed to insert user");

        self.services
            .auth
            .login(&Credentials {
                username,
                password: "pw".to_string(),
            })
            .await
            .expect("Login failed")
    }

    fn book(&self, title: &str) -> CreateBook {
        CreateBook {
            title: format!("{} {}", self.tag, title),
            publication_date: "2020-01-01".to_string(),
            publisher: "Integration".to_string(),
            bookshelf_id: 1,
            room_id: 1,
        }
    }

    async fn cleanup(self) {
        let pattern = format!("{}%", self.tag);
        sqlx::query(
            "DELETE b FROM borrow b JOIN books bk ON b.bookId = bk.bookId WHERE bk.bookName LIKE ?",
        )
        .bind(&pattern)
        .execute(&self.pool)
        .await
        .ok();
        sqlx::query("DELETE FROM books WHERE bookName LIKE ?")
            .bind(&pattern)
            .execute(&self.pool)
            .await
            .ok();
        sqlx::query("DELETE FROM users WHERE username LIKE ?")
            .bind(&pattern)
            .execute(&self.pool)
            .await
            .ok();
        self.pool.close().await;
    }
}

#[tokio::test]
#[ignore]
async fn test_login_roles() {
    let fx = Fixture::new().await;

    assert_eq!(fx.session("admin").await.role(), Role::Admin);
    assert_eq!(fx.session("operator").await.role(), Role::Operator);
    assert_eq!(fx.session("reader").await.role(), Role::Reader);
    assert_eq!(fx.session("janitor").await.role(), Role::Unknown);

    let result = fx
        .services
        .auth
        .login(&Credentials {
            username: format!("{}_admin", fx.tag),
            password: "' OR '1'='1".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AppError::Authentication(_))));

    fx.cleanup().await;
}

#[tokio::test]
#[ignore]
async fn test_catalog_round() {
    let fx = Fixture::new().await;
    let admin = fx.session("admin").await;
    let reader = fx.session("reader").await;
    let catalog = &fx.services.catalog;

    let book = fx.book("T");
    let id = catalog.add_book(&admin, &book).await.unwrap() as i32;

    let found = catalog.search_books(&reader, &BookQuery::keyword(&book.title)).await.unwrap();
    assert!(found.iter().any(|b| b.book_id == id && b.title == book.title));

    let update = UpdateBook {
        book_id: id,
        title: format!("{} renamed", fx.tag),
        publisher: "Other".to_string(),
    };
    assert_eq!(catalog.update_book(&admin, &update).await.unwrap(), 1);

    assert_eq!(catalog.delete_book(&admin, id).await.unwrap(), 1);
    assert_eq!(catalog.delete_book(&admin, id).await.unwrap(), 0);

    let all = catalog.search_books(&reader, &BookQuery::default()).await.unwrap();
    assert!(all.iter().all(|b| b.book_id != id));

    let none = catalog
        .search_books(&reader, &BookQuery::keyword(&format!("{} no such title", fx.tag)))
        .await
        .unwrap();
    assert!(none.is_empty());

    fx.cleanup().await;
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return() {
    let fx = Fixture::new().await;
    let admin = fx.session("admin").await;
    let operator = fx.session("operator").await;
    let reader = fx.session("reader").await;

    let book_id = fx.services.catalog.add_book(&admin, &fx.book("Loaned")).await.unwrap() as i32;
    let key = LoanKey {
        reader_id: reader.user_id(),
        book_id,
    };
    let loans = &fx.services.loans;

    loans.borrow_book(&operator, key).await.unwrap();
    let history = loans.loan_history(&reader, reader.user_id()).await.unwrap();
    let open = history.iter().find(|l| l.book_id == book_id).unwrap();
    assert!(open.returned_at.is_none());

    assert_eq!(loans.return_book(&operator, key).await.unwrap(), 1);
    let history = loans.loan_history(&reader, reader.user_id()).await.unwrap();
    let closed = history.iter().find(|l| l.book_id == book_id).unwrap();
    assert!(closed.returned_at.unwrap() >= closed.borrowed_at);

    // Second return matches nothing and still succeeds
    assert_eq!(loans.return_book(&operator, key).await.unwrap(), 0);

    fx.cleanup().await;
}

#[tokio::test]
#[ignore]
async fn test_denied_action_leaves_catalog_untouched() {
    let fx = Fixture::new().await;
    let operator = fx.session("operator").await;
    let reader = fx.session("reader").await;

    let book = fx.book("Denied");
    let result = fx.services.catalog.add_book(&operator, &book).await;
    assert!(matches!(result, Err(AppError::Authorization(_))));

    let found = fx
        .services
        .catalog
        .search_books(&reader, &BookQuery::keyword(&book.title))
        .await
        .unwrap();
    assert!(found.is_empty());

    fx.cleanup().await;
}

#[tokio::test]
#[ignore]
async fn test_search_matches_wildcards_literally() {
    let fx = Fixture::new().await;
    let admin = fx.session("admin").await;
    let reader = fx.session("reader").await;
    let catalog = &fx.services.catalog;

    let id = catalog.add_book(&admin, &fx.book("100% Wow!")).await.unwrap() as i32;

    let found = catalog
        .search_books(&reader, &BookQuery::keyword(&format!("{} 100% Wow!", fx.tag)))
        .await
        .unwrap();
    assert_eq!(found.iter().map(|b| b.book_id).collect::<Vec<_>>(), vec![id]);

    let none = catalog
        .search_books(&reader, &BookQuery::keyword(&format!("{} 1_0", fx.tag)))
        .await
        .unwrap();
    assert!(none.is_empty());

    fx.cleanup().await;
}
