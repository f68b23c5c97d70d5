//! Data transfer objects shared by the HTTP API.
//!
//! Every type here is part of the public JSON contract. Server-side domain models convert
//! into these at the controller boundary via `into_dto`.

pub mod api;
pub mod category;
pub mod competition;
pub mod drone;
pub mod pilot;
pub mod user;
