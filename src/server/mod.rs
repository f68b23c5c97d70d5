//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework and SeaORM for database operations.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, throttling, access control and DTO conversion
//! - **Service Layer** (`service/`) - Validation, reference resolution and transactional writes
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Filter Layer** (`filter/`) - Per-resource filter, search and ordering declarations
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Caller identity extraction, permission policy and guards
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, throttle counters, link base URL)
//! - **Startup** (`startup`) - Tracing, database and throttle initialization
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Util** (`util/`) - Query string parsing, pagination envelopes and hyperlinks
//!
//! # Request Flow
//!
//! 1. **Router** receives the HTTP request and routes it to a controller
//! 2. **Middleware** resolves the caller from the `Authorization` token
//! 3. **Controller** applies the throttle scope, then the permission gates
//! 4. **Controller** validates the body and query string, converts DTOs to params
//! 5. **Service** validates names, resolves references and writes in a transaction
//! 6. **Data** queries the database and converts entities to domain models
//! 7. **Controller** converts the domain model to a hyperlinked DTO

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod filter;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
