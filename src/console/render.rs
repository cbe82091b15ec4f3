//! Plain-text rendering of query results

use crate::models::{Book, LoanRecord, Session};
use crate::policy::Action;

const RULE: &str = "------------------------------------------------------------";
const BANNER: &str = "========================================";

pub fn menu(session: &Session, actions: &[Action]) -> String {
    let mut out = format!(
        "\n{}\n    Library Management System\n{}\nUser: {} | Role: {}\n",
        BANNER,
        BANNER,
        session.username(),
        session.role()
    );
    for (i, action) in actions.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, action));
    }
    out.push_str("0. Quit\n");
    out.push_str(BANNER);
    out
}

pub fn book_line(book: &Book) -> String {
    format!(
        "ID: {} | Title: {} | Publisher: {} | Date: {} | Shelf: {} | Room: {}",
        book.book_id, book.title, book.publisher, book.publication_date, book.bookshelf_id, book.room_id
    )
}

pub fn loan_line(loan: &LoanRecord) -> String {
    let status = match loan.returned_at {
        Some(returned_at) => format!("Returned: {}", returned_at.format("%Y-%m-%d %H:%M:%S")),
        None => "Status: not yet returned".to_string(),
    };
    format!(
        "Book ID: {} | Title: {} | Borrowed: {} | {}",
        loan.book_id,
        loan.title,
        loan.borrowed_at.format("%Y-%m-%d %H:%M:%S"),
        status
    )
}

/// Heading, rule, one line per row. No rows gives an explicit empty marker.
pub fn listing<T>(heading: &str, rows: &[T], line: impl Fn(&T) -> String) -> String {
    let mut out = format!("\n{}\n{}\n", heading, RULE);
    if rows.is_empty() {
        out.push_str("(no records)\n");
    }
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out.push_str(RULE);
    out
}
