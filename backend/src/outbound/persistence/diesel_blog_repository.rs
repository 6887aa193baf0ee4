//! PostgreSQL-backed `BlogRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BlogPersistenceError, BlogRepository};
use crate::domain::{Blog, BlogDraft, BlogId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BlogRow, BlogUpdate, NewBlogRow};
use super::pool::{DbPool, PoolError};
use super::schema::blogs;

/// Diesel-backed implementation of the [`BlogRepository`] port.
#[derive(Clone)]
pub struct DieselBlogRepository {
    pool: DbPool,
}

impl DieselBlogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_failure(error: PoolError) -> BlogPersistenceError {
    map_pool_error(error, BlogPersistenceError::connection)
}

fn query_failure(error: diesel::result::Error) -> BlogPersistenceError {
    map_diesel_error(
        error,
        BlogPersistenceError::query,
        BlogPersistenceError::connection,
    )
}

fn likes_for_db(blog: &Blog) -> Result<i64, BlogPersistenceError> {
    i64::try_from(blog.likes().get())
        .map_err(|_| BlogPersistenceError::query("likes exceed storable range"))
}

/// Rebuild a domain blog from a stored row.
fn row_to_blog(row: BlogRow) -> Result<Blog, BlogPersistenceError> {
    let draft = BlogDraft::try_new(
        Some(&row.title),
        row.author.as_deref(),
        Some(&row.url),
        Some(row.likes),
    )
    .map_err(|err| BlogPersistenceError::query(format!("corrupt blog row {}: {err}", row.id)))?;
    Ok(Blog::new(
        BlogId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        draft,
    ))
}

#[async_trait]
impl BlogRepository for DieselBlogRepository {
    async fn insert(&self, blog: &Blog) -> Result<(), BlogPersistenceError> {
        let likes = likes_for_db(blog)?;
        let mut conn = self.pool.get().await.map_err(pool_failure)?;
        let row = NewBlogRow {
            id: *blog.id().as_uuid(),
            title: blog.title(),
            author: blog.author(),
            url: blog.url(),
            likes,
            user_id: *blog.owner().as_uuid(),
        };

        diesel::insert_into(blogs::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(query_failure)
    }

    async fn update(&self, blog: &Blog) -> Result<(), BlogPersistenceError> {
        let likes = likes_for_db(blog)?;
        let mut conn = self.pool.get().await.map_err(pool_failure)?;
        let changes = BlogUpdate {
            title: blog.title(),
            author: blog.author(),
            url: blog.url(),
            likes,
        };

        let updated = diesel::update(blogs::table.find(blog.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(query_failure)?;
        if updated == 0 {
            return Err(BlogPersistenceError::query("blog not found for update"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, BlogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_failure)?;
        let row: Option<BlogRow> = blogs::table
            .find(id.as_uuid())
            .select(BlogRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_failure)?;
        row.map(row_to_blog).transpose()
    }

    async fn list(&self) -> Result<Vec<Blog>, BlogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_failure)?;
        let rows: Vec<BlogRow> = blogs::table
            .order((blogs::created_at.asc(), blogs::id.asc()))
            .select(BlogRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_failure)?;
        rows.into_iter().map(row_to_blog).collect()
    }

    async fn delete(&self, id: &BlogId) -> Result<bool, BlogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_failure)?;
        let deleted = diesel::delete(blogs::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(query_failure)?;
        Ok(deleted > 0)
    }
}
