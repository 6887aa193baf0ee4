//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] gathers every HTTP path from the inbound layer together with
//! the view and request schemas. Swagger UI serves it in debug builds and
//! `openapi-dump` prints it for external tooling.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{BlogStats, BlogSummary, BlogView, LoginSession, OwnerSummary, UserView};
use crate::inbound::http::blogs::BlogRequest;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::users::{LoginRequest, RegisterRequest};

/// Register the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        let mut scheme = Http::new(HttpAuthScheme::Bearer);
        scheme.bearer_format = Some("JWT".to_owned());
        scheme.description = Some("Token issued by POST /api/login.".to_owned());
        components.add_security_scheme("bearer", SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bloglist API",
        description = "Blog list with users, bearer-token login and like statistics."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::blogs::list_blogs,
        crate::inbound::http::blogs::blog_stats,
        crate::inbound::http::blogs::create_blog,
        crate::inbound::http::blogs::update_blog,
        crate::inbound::http::blogs::delete_blog,
        crate::inbound::http::users::login,
        crate::inbound::http::users::register,
        crate::inbound::http::users::list_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        BlogView,
        BlogSummary,
        BlogStats,
        OwnerSummary,
        UserView,
        LoginSession,
        BlogRequest,
        LoginRequest,
        RegisterRequest,
        ErrorResponse
    )),
    tags(
        (name = "blogs", description = "Blog entries and like statistics"),
        (name = "users", description = "Accounts and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/blogs")]
    #[case("/api/blogs/stats")]
    #[case("/api/blogs/{id}")]
    #[case("/api/users")]
    #[case("/api/login")]
    #[case("/health/ready")]
    fn document_lists_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
        assert!(components.schemas.contains_key("ErrorResponse"));
    }
}
