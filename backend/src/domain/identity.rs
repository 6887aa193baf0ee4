//! Resolving a bearer token to the user it names.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{IdentityResolver, TokenCodec, TokenError, UserRepository};
use crate::domain::{BearerToken, Error, User, map_user_persistence_error};

/// Returned when the token is absent or fails verification.
pub const TOKEN_MISSING_OR_INVALID: &str = "token missing or invalid";
/// Returned when a verified token lacks a subject or names no stored user.
pub const TOKEN_INVALID: &str = "token invalid";

/// Pull the bearer token out of an `Authorization` header value.
///
/// Absent headers, other schemes and empty tokens all yield `None`; whether
/// that is an error is the caller's decision.
pub fn extract_token(header: Option<&str>) -> Option<BearerToken> {
    BearerToken::from_authorization(header)
}

/// Identity service implementing [`IdentityResolver`].
#[derive(Clone)]
pub struct IdentityService<U, T> {
    users: Arc<U>,
    tokens: Arc<T>,
}

impl<U, T> IdentityService<U, T> {
    /// Create a new resolver.
    pub fn new(users: Arc<U>, tokens: Arc<T>) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl<U, T> IdentityResolver for IdentityService<U, T>
where
    U: UserRepository,
    T: TokenCodec,
{
    async fn resolve_user(&self, token: Option<&BearerToken>) -> Result<User, Error> {
        let token = token.ok_or_else(|| Error::unauthorized(TOKEN_MISSING_OR_INVALID))?;
        let claims = self.tokens.verify(token).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            match err {
                TokenError::MissingSubject => Error::unauthorized(TOKEN_INVALID),
                _ => Error::unauthorized(TOKEN_MISSING_OR_INVALID),
            }
        })?;
        self.users
            .find_by_id(claims.id())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| {
                debug!(user_id = %claims.id(), "token names an unknown user");
                Error::unauthorized(TOKEN_INVALID)
            })
    }
}
