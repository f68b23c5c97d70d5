//! Drones Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the drones
//! API. This crate offers a builder pattern for creating test contexts with in-memory SQLite
//! databases and factories for inserting users, drone categories, drones, pilots and
//! competitions with sensible defaults.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Entity factories with builder-style customization
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_drone_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_drone_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let (owner, category, drone) = factory::helpers::create_drone_with_dependencies(db).await?;
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
