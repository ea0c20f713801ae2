//! LibraryHub Library Management System
//!
//! A Rust implementation of the LibraryHub library management server,
//! providing a REST JSON API for managing the book catalog, borrow
//! lifecycle, acquisition requests and user accounts. All state is held
//! in-memory; there is no persistence layer.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
