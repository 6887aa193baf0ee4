//! Blog use-cases and the ownership bookkeeping that ties blogs to users.
//!
//! Ownership is stored twice: each blog names its owner, and each user keeps
//! an ordered list of the blogs it owns. The store offers no transaction
//! spanning both documents, so every dual write is ordered:
//!
//! 1. write the blog (insert or delete);
//! 2. reload the owner, adjust its blog list, write the owner back.
//!
//! If step 2 fails the blog change stands and the owner's list is stale
//! ("blog visible, link missing" after a create). The failure is logged with
//! both ids and returned to the caller. Concurrent writes to one user's list
//! are last-write-wins.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{BlogRepository, BlogsCommand, BlogsQuery, UserRepository};
use crate::domain::{
    Blog, BlogDraft, BlogId, BlogPatch, BlogStats, BlogView, Error, User, UserId, favorite_blog,
    map_blog_persistence_error, map_user_persistence_error, total_likes,
};

/// Message returned when a non-owner tries to delete a blog.
pub const NOT_OWNER_MESSAGE: &str = "only the creator can delete a blog";

/// Blog service implementing [`BlogsQuery`] and [`BlogsCommand`].
#[derive(Clone)]
pub struct BlogService<B, U> {
    blogs: Arc<B>,
    users: Arc<U>,
}

impl<B, U> BlogService<B, U> {
    /// Create a new service over the given repositories.
    pub fn new(blogs: Arc<B>, users: Arc<U>) -> Self {
        Self { blogs, users }
    }
}

impl<B, U> BlogService<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    async fn find_blog(&self, id: &BlogId) -> Result<Blog, Error> {
        self.blogs
            .find_by_id(id)
            .await
            .map_err(map_blog_persistence_error)?
            .ok_or_else(|| Error::not_found("blog not found"))
    }

    async fn find_owner(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)
    }

    async fn users_by_id(&self) -> Result<HashMap<UserId, User>, Error> {
        let users = self
            .users
            .list()
            .await
            .map_err(map_user_persistence_error)?;
        Ok(users
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect())
    }

    async fn view(&self, blog: &Blog) -> Result<BlogView, Error> {
        let owner = self.find_owner(blog.owner()).await?;
        Ok(BlogView::new(blog, owner.as_ref()))
    }

    /// Second half of a create: append `blog` to its owner's list.
    async fn link_to_owner(&self, blog: &Blog) -> Result<User, Error> {
        let Some(mut owner) = self.find_owner(blog.owner()).await? else {
            error!(
                blog_id = %blog.id(),
                owner_id = %blog.owner(),
                "owner vanished after blog insert; blog is orphaned"
            );
            return Err(Error::internal("blog owner could not be updated"));
        };
        owner.attach_blog(blog.id().clone());
        self.users.update(&owner).await.map_err(|err| {
            error!(
                blog_id = %blog.id(),
                owner_id = %blog.owner(),
                error = %err,
                "failed to link blog to owner; blog is orphaned"
            );
            map_user_persistence_error(err)
        })?;
        Ok(owner)
    }

    /// Second half of a delete: drop `blog_id` from the owner's list.
    async fn unlink_from_owner(&self, owner_id: &UserId, blog_id: &BlogId) -> Result<(), Error> {
        let Some(mut owner) = self.find_owner(owner_id).await? else {
            warn!(%owner_id, %blog_id, "owner vanished before blog unlink");
            return Ok(());
        };
        if !owner.detach_blog(blog_id) {
            warn!(%owner_id, %blog_id, "deleted blog was missing from owner list");
            return Ok(());
        }
        self.users.update(&owner).await.map_err(|err| {
            error!(
                %owner_id,
                %blog_id,
                error = %err,
                "failed to unlink deleted blog from owner; dangling reference left"
            );
            map_user_persistence_error(err)
        })
    }
}

#[async_trait]
impl<B, U> BlogsQuery for BlogService<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    async fn list_blogs(&self) -> Result<Vec<BlogView>, Error> {
        let blogs = self
            .blogs
            .list()
            .await
            .map_err(map_blog_persistence_error)?;
        let owners = self.users_by_id().await?;
        Ok(blogs
            .iter()
            .map(|blog| BlogView::new(blog, owners.get(blog.owner())))
            .collect())
    }

    async fn blog_stats(&self) -> Result<BlogStats, Error> {
        let blogs = self
            .blogs
            .list()
            .await
            .map_err(map_blog_persistence_error)?;
        let favorite = match favorite_blog(&blogs) {
            Some(blog) => Some(self.view(blog).await?),
            None => None,
        };
        Ok(BlogStats {
            total_likes: total_likes(&blogs),
            favorite,
        })
    }
}

#[async_trait]
impl<B, U> BlogsCommand for BlogService<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    async fn create_blog(&self, owner: &User, draft: BlogDraft) -> Result<BlogView, Error> {
        let blog = Blog::new(BlogId::random(), owner.id().clone(), draft);
        self.blogs
            .insert(&blog)
            .await
            .map_err(map_blog_persistence_error)?;
        let owner = self.link_to_owner(&blog).await?;
        info!(blog_id = %blog.id(), owner_id = %owner.id(), "blog created");
        Ok(BlogView::new(&blog, Some(&owner)))
    }

    async fn update_blog(&self, id: &BlogId, patch: BlogPatch) -> Result<BlogView, Error> {
        let mut blog = self.find_blog(id).await?;
        blog.apply(patch);
        self.blogs
            .update(&blog)
            .await
            .map_err(map_blog_persistence_error)?;
        self.view(&blog).await
    }

    async fn delete_blog(&self, owner: &User, id: &BlogId) -> Result<(), Error> {
        let blog = self.find_blog(id).await?;
        if !owner.owns(&blog) {
            debug!(blog_id = %id, requester = %owner.id(), "delete rejected: not the owner");
            return Err(Error::forbidden(NOT_OWNER_MESSAGE));
        }
        let deleted = self
            .blogs
            .delete(id)
            .await
            .map_err(map_blog_persistence_error)?;
        if !deleted {
            return Err(Error::not_found("blog not found"));
        }
        self.unlink_from_owner(blog.owner(), id).await?;
        info!(blog_id = %id, owner_id = %owner.id(), "blog deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "blog_service_tests.rs"]
mod tests;
