//! Driving port for blog mutations.
//!
//! Create and delete write two documents (the blog and its owner). The blog
//! write always happens first; see [`crate::domain::BlogService`].

use async_trait::async_trait;

use crate::domain::{BlogDraft, BlogId, BlogPatch, BlogView, Error, User};

/// Blog mutations bound to an owner.
#[async_trait]
pub trait BlogsCommand: Send + Sync {
    /// Persist a new blog owned by `owner` and link it from the owner.
    async fn create_blog(&self, owner: &User, draft: BlogDraft) -> Result<BlogView, Error>;

    /// Apply a partial update. The owner reference is never changed.
    async fn update_blog(&self, id: &BlogId, patch: BlogPatch) -> Result<BlogView, Error>;

    /// Delete a blog owned by `owner` and unlink it from the owner.
    async fn delete_blog(&self, owner: &User, id: &BlogId) -> Result<(), Error>;
}
