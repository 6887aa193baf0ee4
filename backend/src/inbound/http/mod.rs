//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod blogs;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// The `/api` scope with every blog and user route registered.
///
/// JSON body failures are rendered through [`error::json_error_handler`] so
/// they share the `{"error": ...}` shape. `blog_stats` is registered before
/// the `{id}` routes so `/blogs/stats` never parses as an id.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(blogs::list_blogs)
        .service(blogs::blog_stats)
        .service(blogs::create_blog)
        .service(blogs::update_blog)
        .service(blogs::delete_blog)
        .service(users::login)
        .service(users::register)
        .service(users::list_users)
}
