//! HTTP server configuration object.

use std::net::SocketAddr;

use bloglist::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) token_secret: Vec<u8>,
    pub(crate) token_ttl: Option<chrono::Duration>,
    pub(crate) hash_memory_kib: u32,
    pub(crate) hash_iterations: u32,
}

impl ServerConfig {
    /// Configuration binding `bind_addr` and signing tokens with `secret`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            token_secret: secret.into(),
            token_ttl: None,
            hash_memory_kib: argon2::Params::DEFAULT_M_COST,
            hash_iterations: argon2::Params::DEFAULT_T_COST,
        }
    }

    /// Persist through PostgreSQL instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Expire issued tokens after `ttl`.
    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Option<chrono::Duration>) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Argon2 memory (KiB) and iteration cost for new password hashes.
    #[must_use]
    pub fn with_password_cost(mut self, memory_kib: u32, iterations: u32) -> Self {
        self.hash_memory_kib = memory_kib;
        self.hash_iterations = iterations;
        self
    }
}
