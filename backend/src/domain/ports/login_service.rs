//! Driving port for login.
//!
//! Inbound adapters call it to exchange credentials for a signed token without
//! knowing which store or hashing primitive backs it.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginSession};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a token.
    ///
    /// Unknown usernames and wrong passwords fail with the same
    /// `Unauthorized` error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error>;
}
