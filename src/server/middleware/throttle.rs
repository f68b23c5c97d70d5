use crate::server::{
    error::AppError,
    middleware::identity::Identity,
    service::throttle::{ThrottleDecision, ThrottleScope, ThrottleService},
};

/// Applies a throttle scope to one request.
pub struct ThrottleGuard<'a> {
    throttle: &'a ThrottleService,
    identity: &'a Identity,
}

impl<'a> ThrottleGuard<'a> {
    pub fn new(throttle: &'a ThrottleService, identity: &'a Identity) -> Self {
        Self { throttle, identity }
    }

    /// Counts the request against `scope`.
    ///
    /// # Returns
    /// - `Ok(())` - Request admitted
    /// - `Err(AppError::RateLimited)` - Caller exceeded the scope's rate
    pub fn require(&self, scope: ThrottleScope) -> Result<(), AppError> {
        let caller = self.identity.throttle_caller();

        match self.throttle.check(scope, &caller) {
            ThrottleDecision::Allow => Ok(()),
            ThrottleDecision::Throttle { retry_after } => {
                tracing::debug!(
                    "Throttled {:?} in scope {} for {}s",
                    caller,
                    scope.as_str(),
                    retry_after
                );
                Err(AppError::RateLimited { retry_after })
            }
        }
    }
}
