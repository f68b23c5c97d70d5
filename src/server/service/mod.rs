//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Validation**: Checking names and resolving references by name before any write
//! - **Transaction Management**: Running reference checks, uniqueness checks, writes and
//!   cascading deletes in one store transaction
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//!
//! `throttle` holds the in-memory request counters shared by every handler.

pub mod category;
pub mod competition;
pub mod drone;
pub mod pilot;
pub mod throttle;
pub mod user;
pub mod validate;

#[cfg(test)]
mod test;
