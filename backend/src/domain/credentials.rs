//! Registration and password login.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, PasswordHasher, TokenCodec, UserRegistration, UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, LoginSession, Registration, TokenClaims, User, UserId, UserView,
    Username, map_password_hash_error, map_token_issue_error, map_user_persistence_error,
};

/// Message returned for any failed login, whatever the cause.
pub const INVALID_LOGIN_MESSAGE: &str = "invalid username or password";

/// Credential service implementing [`UserRegistration`] and [`LoginService`].
#[derive(Clone)]
pub struct CredentialService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> CredentialService<U, H, T> {
    /// Create a new service.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<U, H, T> CredentialService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Look the user up and check the password. Unknown usernames and
    /// mismatched passwords are indistinguishable to the caller.
    async fn check_credentials(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        };
        let user = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?;
        let Some(user) = user else {
            debug!(%username, "login for unknown username");
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        };
        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_password_hash_error)?;
        if matches {
            Ok(user)
        } else {
            debug!(%username, "login with wrong password");
            Err(Error::unauthorized(INVALID_LOGIN_MESSAGE))
        }
    }
}

#[async_trait]
impl<U, H, T> UserRegistration for CredentialService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenCodec,
{
    async fn register(&self, registration: Registration) -> Result<UserView, Error> {
        let hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_password_hash_error)?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.name().clone(),
            hash,
        );
        self.users
            .insert(&user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(UserView::new(&user, Vec::new()))
    }
}

#[async_trait]
impl<U, H, T> LoginService for CredentialService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenCodec,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error> {
        let user = self.check_credentials(credentials).await?;
        let claims = TokenClaims::new(user.username().to_string(), user.id().clone());
        let token = self
            .tokens
            .issue(&claims)
            .map_err(map_token_issue_error)?;
        info!(user_id = %user.id(), "login succeeded");
        Ok(LoginSession {
            token: token.as_str().to_owned(),
            username: user.username().to_string(),
            name: user.name().to_string(),
        })
    }
}
