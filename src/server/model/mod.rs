//! Server-side domain models and parameter types.
//!
//! Domain models are built from entity models at the repository boundary, with related
//! names already resolved, and transformed to DTOs at the controller boundary. Parameter
//! types carry validated write requests from controllers to services.

pub mod category;
pub mod competition;
pub mod drone;
pub mod pilot;
pub mod user;
