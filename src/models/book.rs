//! Book (catalog entry) model and related types

use sqlx::FromRow;

/// Book as stored in the `books` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    pub book_id: i32,
    pub title: String,
    pub publisher: String,
    /// Kept as text: the console does not validate dates, the backend may refuse them
    pub publication_date: String,
    pub bookshelf_id: i32,
    pub room_id: i32,
}

/// Create book request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBook {
    pub title: String,
    pub publication_date: String,
    pub publisher: String,
    pub bookshelf_id: i32,
    pub room_id: i32,
}

/// Update book request (only title and publisher can change)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBook {
    pub book_id: i32,
    pub title: String,
    pub publisher: String,
}

/// Escape character for title patterns, declared with `ESCAPE` in the query so
/// the match does not depend on the server's `sql_mode`
pub const LIKE_ESCAPE: char = '!';

/// Catalog search parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub keyword: Option<String>,
}

impl BookQuery {
    pub fn keyword(keyword: &str) -> Self {
        Self {
            keyword: Some(keyword.to_string()),
        }
    }

    /// The keyword to match, or `None` when the whole catalog is requested.
    ///
    /// A keyword made only of whitespace counts as blank; otherwise it is used
    /// exactly as typed, surrounding spaces included.
    pub fn effective_keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// LIKE pattern matching the keyword anywhere in the title.
    ///
    /// Wildcards typed by the user are escaped so they match literally.
    pub fn title_pattern(&self) -> Option<String> {
        self.effective_keyword().map(|keyword| {
            let mut pattern = String::with_capacity(keyword.len() + 2);
            pattern.push('%');
            for c in keyword.chars() {
                if matches!(c, '%' | '_' | LIKE_ESCAPE) {
                    pattern.push(LIKE_ESCAPE);
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}
