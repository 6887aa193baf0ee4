//! Driven port for user persistence.
//!
//! Users are stored as whole documents: [`UserRepository::update`] replaces
//! the stored record, including the owned-blog list. Concurrent updates of
//! the same user are last-write-wins.

use async_trait::async_trait;

use crate::domain::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique constraint on `username` rejected an insert.
        DuplicateUsername { username: String } => "username already taken: {username}",
    }
}

/// Storage contract for user documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with
    /// [`UserPersistenceError::DuplicateUsername`] when the username exists.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Replace an existing user document.
    async fn update(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Every user in insertion order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;
}
