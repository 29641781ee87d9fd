//! ShareIt
//!
//! Peer-to-peer item rental backend: users list items, other users book
//! them for a time window, and anyone can post a request for an item that
//! is not listed yet. The crate ships the REST server and a validating
//! gateway that fronts it.

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all server handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub pool: Pool<Postgres>,
}
