//! Builders wiring domain services over the configured store.

use std::sync::Arc;

use tracing::info;

use bloglist::domain::ports::{BlogRepository, UserRepository};
use bloglist::domain::{BlogService, CredentialService, IdentityService, UserDirectoryService};
use bloglist::inbound::http::state::{HttpState, HttpStatePorts};
use bloglist::outbound::memory::MemoryStore;
use bloglist::outbound::persistence::{DieselBlogRepository, DieselUserRepository};
use bloglist::outbound::security::{Argon2PasswordHasher, HmacTokenCodec};

use super::ServerConfig;

/// Wire every port over one pair of repositories.
fn build_ports<U, B>(
    users: Arc<U>,
    blogs: Arc<B>,
    hasher: Arc<Argon2PasswordHasher>,
    tokens: Arc<HmacTokenCodec>,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    B: BlogRepository + 'static,
{
    let credentials = Arc::new(CredentialService::new(
        users.clone(),
        hasher,
        tokens.clone(),
    ));
    let blog_service = Arc::new(BlogService::new(blogs.clone(), users.clone()));
    HttpStatePorts {
        login: credentials.clone(),
        registration: credentials,
        users: Arc::new(UserDirectoryService::new(users.clone(), blogs)),
        identity: Arc::new(IdentityService::new(users, tokens)),
        blogs_query: blog_service.clone(),
        blogs_command: blog_service,
    }
}

/// Build handler state, using Diesel repositories when a pool is configured
/// and the in-memory store otherwise.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the token secret or Argon2 parameters are
/// rejected.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let tokens = HmacTokenCodec::new(&config.token_secret, config.token_ttl)
        .map_err(|err| std::io::Error::other(format!("token codec: {err}")))?;
    let hasher = Argon2PasswordHasher::new(config.hash_memory_kib, config.hash_iterations)
        .map_err(|err| std::io::Error::other(format!("password hasher: {err}")))?;
    let (hasher, tokens) = (Arc::new(hasher), Arc::new(tokens));

    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL store");
            build_ports(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselBlogRepository::new(pool.clone())),
                hasher,
                tokens,
            )
        }
        None => {
            info!("using in-memory store");
            let store = Arc::new(MemoryStore::new());
            build_ports(store.clone(), store, hasher, tokens)
        }
    };
    Ok(HttpState::new(ports))
}
