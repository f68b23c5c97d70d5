//! HTTP request handlers.
//!
//! Every handler resolves the caller's `Identity`, applies its throttle scope, checks the
//! authorization policy for mutations and only then touches the services. Responses are
//! hyperlinked DTOs built from the configured application URL.

pub mod category;
pub mod competition;
pub mod drone;
pub mod pilot;
pub mod root;
pub mod user;

#[cfg(test)]
mod test;

use crate::server::error::AppError;

/// Error for an unknown resource id.
pub(crate) fn not_found() -> AppError {
    AppError::NotFound("Not found.".to_string())
}
