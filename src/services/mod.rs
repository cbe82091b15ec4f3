//! Business logic services

pub mod auth;
pub mod catalog;
pub mod loans;

use std::sync::Arc;

use crate::repository::LibraryStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self {
            auth: auth::AuthService::new(store.clone()),
            catalog: catalog::CatalogService::new(store.clone()),
            loans: loans::LoansService::new(store),
        }
    }
}
