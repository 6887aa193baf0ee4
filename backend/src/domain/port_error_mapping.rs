//! Translation of driven-port failures into domain [`Error`]s.
//!
//! Connection failures surface as `ServiceUnavailable`; everything else a
//! client cannot act on becomes `InternalError`, whose message the HTTP
//! adapter redacts.

use tracing::error;

use crate::domain::Error;
use crate::domain::ports::{
    BlogPersistenceError, PasswordHashError, TokenError, UserPersistenceError,
};

/// Message returned when the username unique constraint fires.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "expected `username` to be unique";

/// Map user repository failures.
pub fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::conflict(DUPLICATE_USERNAME_MESSAGE)
        }
    }
}

/// Map blog repository failures.
pub fn map_blog_persistence_error(error: BlogPersistenceError) -> Error {
    match error {
        BlogPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("blog repository unavailable: {message}"))
        }
        BlogPersistenceError::Query { message } => {
            Error::internal(format!("blog repository error: {message}"))
        }
    }
}

/// Map hashing primitive failures.
pub fn map_password_hash_error(error: PasswordHashError) -> Error {
    error!(%error, "password hashing primitive failed");
    Error::internal(error.to_string())
}

/// Map token issuance failures. Verification failures are handled by the
/// identity resolver, which turns them into `Unauthorized`.
pub fn map_token_issue_error(error: TokenError) -> Error {
    error!(%error, "token issuance failed");
    Error::internal(error.to_string())
}
