//! Driven port for issuing and verifying signed identity tokens.
//!
//! The signing key is owned by the adapter for the process lifetime; callers
//! never see it.

use crate::domain::{BearerToken, TokenClaims};

use super::define_port_error;

define_port_error! {
    /// Token issuance and verification failures.
    pub enum TokenError {
        /// The token is not a well-formed compact token.
        Malformed { message: String } => "token is malformed: {message}",
        /// The signature does not match the payload.
        BadSignature => "token signature is invalid",
        /// The token carries an expiry in the past.
        Expired => "token has expired",
        /// The payload has no usable subject identifier.
        MissingSubject => "token payload lacks a subject id",
        /// Issuing a token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signs and verifies identity tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Issue a signed token for `claims`.
    fn issue(&self, claims: &TokenClaims) -> Result<BearerToken, TokenError>;

    /// Verify `token` and return its claims.
    fn verify(&self, token: &BearerToken) -> Result<TokenClaims, TokenError>;
}
