//! Read models returned to clients.
//!
//! Each side of the blog/user relationship is expanded into a small summary
//! of the other side. Password hashes never reach these types.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Blog, User};

/// Owner summary embedded in a blog view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Bret")]
    pub username: String,
    #[schema(example = "Leanne Graham")]
    pub name: String,
}

impl From<&User> for OwnerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            name: user.name().to_string(),
        }
    }
}

/// Blog as returned by the blog routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogView {
    #[schema(example = "0b8e6a4c-3f38-4c3c-9d0b-4a2f1f9b7a10")]
    pub id: String,
    #[schema(example = "React patterns")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Michael Chan")]
    pub author: Option<String>,
    #[schema(example = "https://reactpatterns.com/")]
    pub url: String,
    #[schema(example = 7)]
    pub likes: u64,
    /// `null` when the owner record can no longer be found.
    pub user: Option<OwnerSummary>,
}

impl BlogView {
    /// Render `blog` with its owner, if known.
    pub fn new(blog: &Blog, owner: Option<&User>) -> Self {
        Self {
            id: blog.id().to_string(),
            title: blog.title().to_owned(),
            author: blog.author().map(str::to_owned),
            url: blog.url().to_owned(),
            likes: blog.likes().get(),
            user: owner.map(OwnerSummary::from),
        }
    }
}

/// Blog summary embedded in a user view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub url: String,
}

impl From<&Blog> for BlogSummary {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id().to_string(),
            title: blog.title().to_owned(),
            author: blog.author().map(str::to_owned),
            url: blog.url().to_owned(),
        }
    }
}

/// User as returned by the user routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    #[schema(example = "IWMor")]
    pub username: String,
    #[schema(example = "Corey")]
    pub name: String,
    pub blogs: Vec<BlogSummary>,
}

impl UserView {
    /// Render `user` with the given expanded blogs.
    pub fn new(user: &User, blogs: Vec<BlogSummary>) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            name: user.name().to_string(),
            blogs,
        }
    }
}

/// Aggregate like statistics over every stored blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogStats {
    pub total_likes: u64,
    pub favorite: Option<BlogView>,
}
