//! Users repository for database operations

use sqlx::{MySql, Pool};

use crate::{
    error::AppResult,
    models::user::{User, UserRow},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<MySql>,
}

impl UsersRepository {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    /// Get the user whose stored username and password both match.
    ///
    /// Passwords are stored in clear in the `users` table; the comparison is done
    /// by the backend on bound values.
    pub async fn get_by_credentials(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT userId AS user_id, username, CAST(role AS CHAR) AS role
            FROM users
            WHERE username = ? AND password = ?
            LIMIT 1
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }
}
