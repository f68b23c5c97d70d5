use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Scheme advertised in the `WWW-Authenticate` header of 401 responses.
const AUTH_SCHEME: &str = "Token";

#[derive(Error, Debug)]
pub enum AuthError {
    /// A mutating request arrived without credentials.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Authentication credentials were not provided.")]
    NotAuthenticated,

    /// The `Authorization: Token` header is present but malformed.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Invalid token header: {0}")]
    InvalidHeader(&'static str),

    /// The supplied token does not belong to any user.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Invalid token.")]
    InvalidToken,

    /// The caller is authenticated but does not own the target drone.
    ///
    /// Results in a 403 Forbidden response. The drone id and user id are only logged.
    #[error("User {user_id:?} attempted to modify drone {drone_id} owned by {owner_id:?}")]
    NotOwner {
        drone_id: i32,
        user_id: Option<i32>,
        owner_id: Option<i32>,
    },
}

/// Converts authentication errors into HTTP responses.
///
/// - `NotAuthenticated` / `InvalidHeader` / `InvalidToken` → 401 Unauthorized with a
///   `WWW-Authenticate: Token` challenge
/// - `NotOwner` → 403 Forbidden with a generic message
///
/// All errors are logged at debug level for diagnostics.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotAuthenticated | Self::InvalidHeader(_) | Self::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, AUTH_SCHEME)],
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            Self::NotOwner { .. } => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "You do not have permission to perform this action.".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
