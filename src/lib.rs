//! Bookshelf library server
//!
//! REST JSON API for a library catalog: book issue and return with per-day
//! charges, reviews, ratings and per-user reports.

use std::sync::Arc;

pub mod api;
pub mod charges;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
