//! Error types for the Stacks console

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    Authorization(String),

    #[error("Statement failed: {}", describe_statement_error(.0))]
    Statement(#[from] sqlx::Error),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render a sqlx error with the backend diagnostic (SQLSTATE + message) when there is one
fn describe_statement_error(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db) => match db.code() {
            Some(code) => format!("SQLSTATE {}: {}", code, db.message()),
            None => db.message().to_string(),
        },
        other => other.to_string(),
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Process exit status for the outcome of a run: 0 when the user quit, 1 when
/// the menu was never reached or the console failed
pub fn exit_status(outcome: &AppResult<()>) -> u8 {
    match outcome {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
