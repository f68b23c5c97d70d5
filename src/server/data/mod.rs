//! Database repository layer for all domain entities.
//!
//! Each repository wraps a borrowed connection and is generic over `ConnectionTrait`, so the
//! same repository runs against the connection pool for reads and against a
//! `DatabaseTransaction` inside service-level writes. Repositories use SeaORM entity models
//! internally and return domain models with related names already resolved; related rows
//! are loaded in one batched query per relation rather than per row.

pub mod category;
pub mod competition;
pub mod drone;
pub mod pilot;
pub mod user;

#[cfg(test)]
mod test;
