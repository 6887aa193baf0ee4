//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BLOGLIST_*` environment variables and config
//! files, in OrthoConfig's usual precedence.

use std::net::{AddrParseError, IpAddr, SocketAddr};

use chrono::Duration;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3003;
const DEFAULT_HASH_MEMORY_KIB: u32 = 19 * 1024;
const DEFAULT_HASH_ITERATIONS: u32 = 2;

/// Token lifetime outside the representable range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("token lifetime of {0} seconds is too large")]
pub struct TokenTtlError(i64);

/// Runtime configuration for the server binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOGLIST")]
pub struct AppSettings {
    /// Token signing secret. Startup fails without it.
    pub secret: Option<String>,
    /// Address to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Token lifetime in seconds; tokens never expire when absent.
    pub token_ttl_secs: Option<i64>,
    /// Argon2 memory cost in KiB.
    pub password_hash_memory_kib: Option<u32>,
    /// Argon2 iteration count.
    pub password_hash_iterations: Option<u32>,
}

impl AppSettings {
    /// The signing secret, rejecting blank values.
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Socket address built from `host` and `port`.
    ///
    /// # Errors
    ///
    /// [`AddrParseError`] when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let host: IpAddr = self.host.as_deref().unwrap_or(DEFAULT_HOST).parse()?;
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Database URL, treating an empty value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Token lifetime; non-positive values mean no expiry.
    ///
    /// # Errors
    ///
    /// [`TokenTtlError`] when the value is too large to represent.
    pub fn token_ttl(&self) -> Result<Option<Duration>, TokenTtlError> {
        self.token_ttl_secs
            .filter(|secs| *secs > 0)
            .map(|secs| Duration::try_seconds(secs).ok_or(TokenTtlError(secs)))
            .transpose()
    }

    /// Argon2 memory cost, defaulting to the argon2 recommendation.
    pub fn password_hash_memory_kib(&self) -> u32 {
        self.password_hash_memory_kib
            .unwrap_or(DEFAULT_HASH_MEMORY_KIB)
    }

    /// Argon2 iteration count, defaulting to the argon2 recommendation.
    pub fn password_hash_iterations(&self) -> u32 {
        self.password_hash_iterations
            .unwrap_or(DEFAULT_HASH_ITERATIONS)
    }
}
