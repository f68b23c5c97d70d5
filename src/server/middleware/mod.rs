//! Request guards evaluated by every handler before touching the store.
//!
//! - `identity` - Resolves the caller from the `Authorization` header
//! - `throttle` - Applies the caller's throttle scope
//! - `permission` - Pure authorization decisions
//! - `auth` - Converts authorization decisions into errors

pub mod auth;
pub mod identity;
pub mod permission;
pub mod throttle;
