//! Driven port for blog persistence.

use async_trait::async_trait;

use crate::domain::{Blog, BlogId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by blog repository adapters.
    pub enum BlogPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "blog repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "blog repository query failed: {message}",
    }
}

/// Storage contract for blog documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Insert a new blog.
    async fn insert(&self, blog: &Blog) -> Result<(), BlogPersistenceError>;

    /// Replace an existing blog document.
    async fn update(&self, blog: &Blog) -> Result<(), BlogPersistenceError>;

    /// Fetch a blog by identifier.
    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, BlogPersistenceError>;

    /// Every blog in insertion order.
    async fn list(&self) -> Result<Vec<Blog>, BlogPersistenceError>;

    /// Remove a blog. Returns `false` when nothing was stored under `id`.
    async fn delete(&self, id: &BlogId) -> Result<bool, BlogPersistenceError>;
}
