//! Driving port for creating user accounts.

use async_trait::async_trait;

use crate::domain::{Error, Registration, UserView};

/// Domain use-case port for registration.
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Hash the password, persist the user and return its public view.
    async fn register(&self, registration: Registration) -> Result<UserView, Error>;
}
