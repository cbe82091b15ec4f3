//! Role-based access rules
//!
//! Every action requires exactly one role. There is no hierarchy: an
//! administrator cannot borrow a book, an operator cannot search the catalog.

use crate::{
    error::{AppError, AppResult},
    models::{Role, Session},
};

/// Operations reachable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    AddBook,
    DeleteBook,
    UpdateBook,
    BorrowBook,
    ReturnBook,
    SearchBooks,
    LoanHistory,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::AddBook,
        Action::DeleteBook,
        Action::UpdateBook,
        Action::BorrowBook,
        Action::ReturnBook,
        Action::SearchBooks,
        Action::LoanHistory,
    ];

    pub fn required_role(&self) -> Role {
        match self {
            Action::AddBook | Action::DeleteBook | Action::UpdateBook => Role::Admin,
            Action::BorrowBook | Action::ReturnBook => Role::Operator,
            Action::SearchBooks | Action::LoanHistory => Role::Reader,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::AddBook => "Add book",
            Action::DeleteBook => "Delete book",
            Action::UpdateBook => "Update book",
            Action::BorrowBook => "Record loan",
            Action::ReturnBook => "Record return",
            Action::SearchBooks => "Search books",
            Action::LoanHistory => "Loan history",
        }
    }

    /// Actions granted to `role`, in menu order
    pub fn for_role(role: Role) -> Vec<Action> {
        Self::ALL
            .into_iter()
            .filter(|action| permit(role, action.required_role()))
            .collect()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Exact role match. `Unknown` is never required, so it is never permitted.
pub fn permit(role: Role, required: Role) -> bool {
    role != Role::Unknown && role == required
}

/// Check that the session may run `action`
pub fn authorize(session: &Session, action: Action) -> AppResult<()> {
    let required = action.required_role();
    if permit(session.role(), required) {
        return Ok(());
    }

    tracing::warn!(
        user = session.username(),
        role = %session.role(),
        action = %action,
        "Permission denied"
    );
    Err(AppError::Authorization(format!(
        "'{}' requires the {} role",
        action, required
    )))
}
