//! Driving port turning a bearer token into the acting user.

use async_trait::async_trait;

use crate::domain::{BearerToken, Error, User};

/// Resolves request identities.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Verify `token` and load the user it names.
    ///
    /// Fails with `Unauthorized` when the token is absent, does not verify,
    /// carries no subject, or names a user that no longer exists.
    async fn resolve_user(&self, token: Option<&BearerToken>) -> Result<User, Error>;
}
