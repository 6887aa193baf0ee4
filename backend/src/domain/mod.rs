//! Domain primitives, aggregates and use-case services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters, plus the services that implement the driving ports.
//! Validation happens when values are constructed, so a `Blog` or `User` in
//! hand is always well formed.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Blog, BlogDraft, BlogPatch: blog records and validated inputs.
//! - User, Username, DisplayName, PasswordHash: account records.
//! - BearerToken, TokenClaims, LoginSession: authentication values.
//! - BlogService, CredentialService, IdentityService, UserDirectoryService:
//!   driving-port implementations over the driven ports in [`ports`].

pub mod auth;
pub mod blog;
pub mod blog_service;
pub mod blog_stats;
pub mod credentials;
pub mod error;
pub mod identity;
pub mod port_error_mapping;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_directory;
pub mod views;

pub use self::auth::{
    BEARER_PREFIX, BearerToken, LoginCredentials, LoginSession, LoginValidationError,
    PASSWORD_MIN, Registration, RegistrationValidationError, TokenClaims,
};
pub use self::blog::{Blog, BlogDraft, BlogId, BlogPatch, BlogValidationError, Likes};
pub use self::blog_service::{BlogService, NOT_OWNER_MESSAGE};
pub use self::blog_stats::{favorite_blog, total_likes};
pub use self::credentials::{CredentialService, INVALID_LOGIN_MESSAGE};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{
    IdentityService, TOKEN_INVALID, TOKEN_MISSING_OR_INVALID, extract_token,
};
pub use self::port_error_mapping::{
    DUPLICATE_USERNAME_MESSAGE, map_blog_persistence_error, map_password_hash_error,
    map_token_issue_error, map_user_persistence_error,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DisplayName, PasswordHash, USERNAME_MIN, User, UserId, UserValidationError, Username,
};
pub use self::user_directory::UserDirectoryService;
pub use self::views::{BlogStats, BlogSummary, BlogView, OwnerSummary, UserView};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use bloglist::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("blog not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
