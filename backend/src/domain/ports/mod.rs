//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`, [`LoginService`],
//! [`UserRegistration`], [`IdentityResolver`]) are called by inbound
//! adapters. Driven ports (repositories, [`PasswordHasher`], [`TokenCodec`])
//! are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod blog_repository;
mod blogs_command;
mod blogs_query;
mod identity_resolver;
mod login_service;
mod password_hasher;
mod token_codec;
mod user_registration;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use blog_repository::MockBlogRepository;
pub use blog_repository::{BlogPersistenceError, BlogRepository};
pub use blogs_command::BlogsCommand;
pub use blogs_query::BlogsQuery;
pub use identity_resolver::IdentityResolver;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenError};
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_query::UsersQuery;
