//! Driving port for blog reads.

use async_trait::async_trait;

use crate::domain::{BlogStats, BlogView, Error};

/// Read-only blog use-cases; no identity required.
#[async_trait]
pub trait BlogsQuery: Send + Sync {
    /// Every blog in persistence order with its owner summary.
    async fn list_blogs(&self) -> Result<Vec<BlogView>, Error>;

    /// Like totals and the most liked blog.
    async fn blog_stats(&self) -> Result<BlogStats, Error>;
}
