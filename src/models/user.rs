//! User model, roles and the authenticated session

use sqlx::FromRow;

/// User roles, one per account in the `users` table.
///
/// The stored value is matched case-sensitively; anything that is not one of the
/// three known strings becomes [`Role::Unknown`], which can log in but is granted
/// no actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Operator,
    Reader,
    Unknown,
}

impl Role {
    /// Human readable label for the menu header
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Operator => "Operator",
            Role::Reader => "Reader",
            Role::Unknown => "Unknown",
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            "operator" => Role::Operator,
            "reader" => Role::Reader,
            _ => Role::Unknown,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Internal row structure for the login lookup
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: i32,
    pub username: String,
    pub role: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.user_id,
            username: row.username,
            role: Role::from(row.role.as_str()),
        }
    }
}

/// User as seen by this console (the password never leaves the database)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

/// Login request
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The authenticated user for one run of the program.
///
/// Built once by the auth service and handed by reference to every operation;
/// it is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> i32 {
        self.user.id
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}
