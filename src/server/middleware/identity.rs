//! Caller identity resolution.
//!
//! Callers authenticate with `Authorization: Token <key>`. A request without that header,
//! or with a different scheme, is anonymous. Tokens are provisioned out-of-band; this
//! module only looks them up.

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use std::net::SocketAddr;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    service::throttle::ThrottleCaller,
    state::AppState,
};

const TOKEN_SCHEME: &str = "token";
const FORWARDED_FOR: &str = "x-forwarded-for";
const ANONYMOUS: &str = "anonymous";

/// Authenticated user attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
}

/// Identity of the caller making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Authenticated user, `None` for anonymous callers.
    pub user: Option<AuthUser>,
    /// Client address from `X-Forwarded-For` or the socket peer.
    pub remote_addr: Option<String>,
}

impl Identity {
    pub fn anonymous(remote_addr: Option<String>) -> Self {
        Self {
            user: None,
            remote_addr,
        }
    }

    pub fn user_id(&self) -> Option<i32> {
        self.user.as_ref().map(|user| user.id)
    }

    /// Key half used by the throttle service.
    pub fn throttle_caller(&self) -> ThrottleCaller {
        match &self.user {
            Some(user) => ThrottleCaller::User(user.id),
            None => ThrottleCaller::Anonymous(
                self.remote_addr
                    .clone()
                    .unwrap_or_else(|| ANONYMOUS.to_string()),
            ),
        }
    }
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let remote_addr = remote_addr(parts);

        let Some(token) = token_from_headers(&parts.headers)? else {
            return Ok(Identity::anonymous(remote_addr));
        };

        let Some(user) = UserRepository::new(&state.db).find_by_token(&token).await? else {
            return Err(AuthError::InvalidToken.into());
        };

        Ok(Identity {
            user: Some(AuthUser {
                id: user.id,
                username: user.username,
            }),
            remote_addr,
        })
    }
}

/// Extracts the token key from the `Authorization` header.
///
/// # Returns
/// - `Ok(Some(token))` - Header uses the token scheme with exactly one key
/// - `Ok(None)` - No header, or a different scheme
/// - `Err(AuthError::InvalidHeader)` - Token scheme without a usable key
pub fn token_from_headers(headers: &HeaderMap) -> Result<Option<String>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Token string should not contain invalid characters."))?;

    let mut parts = value.split_whitespace();
    match parts.next() {
        Some(scheme) if scheme.eq_ignore_ascii_case(TOKEN_SCHEME) => {}
        _ => return Ok(None),
    }

    let token = parts
        .next()
        .ok_or(AuthError::InvalidHeader("No credentials provided."))?;

    if parts.next().is_some() {
        return Err(AuthError::InvalidHeader(
            "Token string should not contain spaces.",
        ));
    }

    Ok(Some(token.to_string()))
}

fn remote_addr(parts: &Parts) -> Option<String> {
    let forwarded = parts
        .headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|addr| addr.trim().to_string())
        .filter(|addr| !addr.is_empty());

    forwarded.or_else(|| {
        parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
    })
}
