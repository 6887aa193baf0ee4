//! Backend entry-point: loads settings, prepares the store and serves the API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bloglist::inbound::http::health::HealthState;
use bloglist::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use ortho_config::OrthoConfig;
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let secret = settings
        .secret()
        .ok_or_else(|| std::io::Error::other("BLOGLIST_SECRET must be set"))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid host: {e}")))?;

    let token_ttl = settings
        .token_ttl()
        .map_err(|e| std::io::Error::other(format!("invalid token lifetime: {e}")))?;

    let mut config = ServerConfig::new(bind_addr, secret.as_bytes())
        .with_token_ttl(token_ttl)
        .with_password_cost(
            settings.password_hash_memory_kib(),
            settings.password_hash_iterations(),
        );

    if let Some(url) = settings.database_url() {
        let migrate_url = url.to_owned();
        tokio::task::spawn_blocking(move || run_pending_migrations(&migrate_url))
            .await
            .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
