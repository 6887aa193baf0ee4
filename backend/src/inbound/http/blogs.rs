//! Blog API handlers.
//!
//! ```text
//! GET    /api/blogs
//! GET    /api/blogs/stats
//! POST   /api/blogs        {"title":"T","author":"A","url":"U","likes":3}
//! PUT    /api/blogs/{id}   {"likes":4}
//! DELETE /api/blogs/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{BlogDraft, BlogPatch, BlogStats, BlogView, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{MaybeBearerToken, require_user};
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{blog_validation_error, coerce_likes, parse_blog_id};

/// Request body shared by create and update.
///
/// On create `title` and `url` are required; on update every field is
/// optional and absent fields keep their stored value. `likes` accepts an
/// integer, an integral float or a numeric string.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct BlogRequest {
    #[schema(example = "React patterns")]
    pub title: Option<String>,
    #[schema(example = "Michael Chan")]
    pub author: Option<String>,
    #[schema(example = "https://reactpatterns.com/")]
    pub url: Option<String>,
    #[schema(value_type = Option<i64>, example = 7)]
    pub likes: Option<Value>,
}

impl TryFrom<BlogRequest> for BlogDraft {
    type Error = Error;

    fn try_from(value: BlogRequest) -> Result<Self, Self::Error> {
        let likes = coerce_likes(value.likes.as_ref()).map_err(blog_validation_error)?;
        Self::try_new(
            value.title.as_deref(),
            value.author.as_deref(),
            value.url.as_deref(),
            likes,
        )
        .map_err(blog_validation_error)
    }
}

impl TryFrom<BlogRequest> for BlogPatch {
    type Error = Error;

    fn try_from(value: BlogRequest) -> Result<Self, Self::Error> {
        let likes = coerce_likes(value.likes.as_ref()).map_err(blog_validation_error)?;
        Self::try_new(
            value.title.as_deref(),
            value.author.as_deref(),
            value.url.as_deref(),
            likes,
        )
        .map_err(blog_validation_error)
    }
}

/// List every blog with its owner summary.
#[utoipa::path(
    get,
    path = "/api/blogs",
    responses(
        (status = 200, description = "Blogs", body = [BlogView]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["blogs"],
    operation_id = "listBlogs"
)]
#[get("/blogs")]
pub async fn list_blogs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<BlogView>>> {
    Ok(web::Json(state.blogs_query.list_blogs().await?))
}

/// Total likes and the most liked blog.
#[utoipa::path(
    get,
    path = "/api/blogs/stats",
    responses(
        (status = 200, description = "Like statistics", body = BlogStats),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["blogs"],
    operation_id = "blogStats"
)]
#[get("/blogs/stats")]
pub async fn blog_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<BlogStats>> {
    Ok(web::Json(state.blogs_query.blog_stats().await?))
}

/// Create a blog owned by the caller.
#[utoipa::path(
    post,
    path = "/api/blogs",
    request_body = BlogRequest,
    responses(
        (status = 201, description = "Created", body = BlogView),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tags = ["blogs"],
    operation_id = "createBlog",
    security(("bearer" = []))
)]
#[post("/blogs")]
pub async fn create_blog(
    state: web::Data<HttpState>,
    token: MaybeBearerToken,
    payload: web::Json<BlogRequest>,
) -> ApiResult<HttpResponse> {
    let owner = require_user(&state, &token).await?;
    let draft = BlogDraft::try_from(payload.into_inner())?;
    let view = state.blogs_command.create_blog(&owner, draft).await?;
    Ok(HttpResponse::Created().json(view))
}

/// Update a blog's fields.
#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog identifier")),
    request_body = BlogRequest,
    responses(
        (status = 200, description = "Updated", body = BlogView),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Blog not found", body = ErrorResponse)
    ),
    tags = ["blogs"],
    operation_id = "updateBlog"
)]
#[put("/blogs/{id}")]
pub async fn update_blog(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<BlogRequest>,
) -> ApiResult<web::Json<BlogView>> {
    let id = parse_blog_id(&path.into_inner())?;
    let patch = BlogPatch::try_from(payload.into_inner())?;
    Ok(web::Json(state.blogs_command.update_blog(&id, patch).await?))
}

/// Delete a blog the caller owns.
#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Missing token or not the owner", body = ErrorResponse),
        (status = 404, description = "Blog not found", body = ErrorResponse)
    ),
    tags = ["blogs"],
    operation_id = "deleteBlog",
    security(("bearer" = []))
)]
#[delete("/blogs/{id}")]
pub async fn delete_blog(
    state: web::Data<HttpState>,
    token: MaybeBearerToken,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = require_user(&state, &token).await?;
    let id = parse_blog_id(&path.into_inner())?;
    state.blogs_command.delete_blog(&owner, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "blogs_tests.rs"]
mod tests;
