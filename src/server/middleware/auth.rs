use axum::http::Method;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        identity::{AuthUser, Identity},
        permission::{self, Decision},
    },
};

/// Applies the authorization policy to one request.
///
/// Wraps the caller's identity and the request method and turns `permission` decisions
/// into `AuthError`s.
pub struct AuthGuard<'a> {
    identity: &'a Identity,
    method: &'a Method,
}

impl<'a> AuthGuard<'a> {
    pub fn new(identity: &'a Identity, method: &'a Method) -> Self {
        Self { identity, method }
    }

    /// Requires an authenticated caller for anything but safe methods.
    ///
    /// # Returns
    /// - `Ok(())` - Safe method, or authenticated caller
    /// - `Err(AuthError::NotAuthenticated)` - Anonymous mutation
    pub fn require_authenticated_or_read_only(&self) -> Result<(), AppError> {
        match permission::authenticated_or_read_only(self.method, self.identity.user_id()) {
            Decision::Allow => Ok(()),
            _ => Err(AuthError::NotAuthenticated.into()),
        }
    }

    /// Requires an authenticated caller and returns it.
    ///
    /// Used by creation endpoints that record the caller as owner.
    pub fn require_user(&self) -> Result<&'a AuthUser, AppError> {
        self.identity
            .user
            .as_ref()
            .ok_or_else(|| AuthError::NotAuthenticated.into())
    }

    /// Requires the caller to own the drone for anything but safe methods.
    ///
    /// # Arguments
    /// - `drone_id` - Target drone, for logging
    /// - `owner_id` - Owner recorded on the target drone
    ///
    /// # Returns
    /// - `Ok(())` - Safe method, or caller is the owner
    /// - `Err(AuthError::NotAuthenticated)` - Anonymous mutation
    /// - `Err(AuthError::NotOwner)` - Mutation by someone else
    pub fn require_owner(&self, drone_id: i32, owner_id: Option<i32>) -> Result<(), AppError> {
        let user_id = self.identity.user_id();
        match permission::owner_or_read_only(self.method, user_id, owner_id) {
            Decision::Allow => Ok(()),
            Decision::DenyUnauthenticated => Err(AuthError::NotAuthenticated.into()),
            Decision::DenyNotOwner => Err(AuthError::NotOwner {
                drone_id,
                user_id,
                owner_id,
            }
            .into()),
        }
    }
}
