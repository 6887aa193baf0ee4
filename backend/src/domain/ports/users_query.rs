//! Driving port for listing users.

use async_trait::async_trait;

use crate::domain::{Error, UserView};

/// Domain use-case port for user listings.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user with their blogs expanded to summaries.
    async fn list_users(&self) -> Result<Vec<UserView>, Error>;
}
