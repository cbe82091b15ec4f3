//! Authentication service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Credentials, Role, Session},
    repository::LibraryStore,
};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn LibraryStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    /// Authenticate by username and password and open the session for this run
    pub async fn login(&self, credentials: &Credentials) -> AppResult<Session> {
        let user = self
            .store
            .find_user_by_credentials(&credentials.username, &credentials.password)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user = %credentials.username, "Login rejected");
                AppError::Authentication("credentials invalid".to_string())
            })?;

        if user.role == Role::Unknown {
            tracing::warn!(user = %user.username, "Account has an unrecognized role, no actions granted");
        }
        tracing::info!(user = %user.username, user_id = user.id, role = %user.role, "Login succeeded");

        Ok(Session::new(user))
    }
}
