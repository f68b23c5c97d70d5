//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources needed by
//! the request handlers. The state is initialized once during startup and then cloned for
//! each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - Throttle service holding the per-scope request counters
//! - Application URL and page sizes for building hyperlinked list responses

use sea_orm::DatabaseConnection;

use crate::server::{config::Config, service::throttle::ThrottleService};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `ThrottleService` keeps its counters behind an `Arc`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Request counters shared by every handler.
    pub throttle: ThrottleService,

    /// Absolute base URL, without trailing slash, used to render hyperlinks.
    pub app_url: String,

    /// Default `limit` of list endpoints.
    pub page_size: u64,

    /// Upper bound on a client-supplied `limit`.
    pub max_page_size: u64,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `throttle` - Throttle service
    /// - `config` - Application configuration providing the URL and page sizes
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, throttle: ThrottleService, config: &Config) -> Self {
        Self {
            db,
            throttle,
            app_url: config.app_url.clone(),
            page_size: config.page_size,
            max_page_size: config.max_page_size,
        }
    }
}
