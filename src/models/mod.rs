//! Data models for Stacks

pub mod book;
pub mod loan;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookQuery, CreateBook, UpdateBook};
pub use loan::{LoanKey, LoanRecord};
pub use user::{Credentials, Role, Session, User};
