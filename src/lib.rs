//! Stacks - library catalog and loans console
//!
//! A single-user terminal client for a MySQL library database. Users log in,
//! get the menu of their role and run catalog or loan operations; every
//! operation is checked against the role policy before it reaches the backend.

pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
