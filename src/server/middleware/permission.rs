//! Authorization decisions.
//!
//! Both checks are pure functions of the request method, the caller and, for ownership,
//! the owner recorded on the target. They never touch the store.

use axum::http::Method;

/// Result of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Mutation attempted without an authenticated identity.
    DenyUnauthenticated,
    /// Mutation attempted by someone other than the owner.
    DenyNotOwner,
}

/// Returns true for methods that never modify state.
pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Allows safe methods for everyone and mutations for authenticated callers only.
///
/// # Arguments
/// - `method` - Request method
/// - `user_id` - Caller's user id, `None` when anonymous
pub fn authenticated_or_read_only(method: &Method, user_id: Option<i32>) -> Decision {
    if is_safe_method(method) || user_id.is_some() {
        Decision::Allow
    } else {
        Decision::DenyUnauthenticated
    }
}

/// Allows safe methods for everyone and mutations only for the target's owner.
///
/// A target without an owner cannot be mutated by anyone.
///
/// # Arguments
/// - `method` - Request method
/// - `user_id` - Caller's user id, `None` when anonymous
/// - `owner_id` - Owner recorded on the target
pub fn owner_or_read_only(method: &Method, user_id: Option<i32>, owner_id: Option<i32>) -> Decision {
    if is_safe_method(method) {
        return Decision::Allow;
    }

    match (user_id, owner_id) {
        (None, _) => Decision::DenyUnauthenticated,
        (Some(user), Some(owner)) if user == owner => Decision::Allow,
        _ => Decision::DenyNotOwner,
    }
}
