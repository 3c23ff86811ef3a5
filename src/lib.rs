//! Bookshelf Server
//!
//! An in-memory book record manager with a REST JSON API: create, list,
//! fetch, update and delete books on a shelf that lives as long as the
//! process does.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::InMemoryBookStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// State backed by a fresh, empty in-memory book store
    pub fn in_memory(config: AppConfig) -> Self {
        let services = services::Services::new(Arc::new(InMemoryBookStore::new()), &config);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
