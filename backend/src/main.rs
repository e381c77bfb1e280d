//! Dashboard entry-point: loads settings, wires adapters and serves the
//! form endpoints.

mod server;

use std::io;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use dashboard::inbound::http::session_config::{BuildMode, session_settings};
use dashboard::outbound::cache::RedisViewCache;
use dashboard::outbound::persistence::{DbPool, PoolConfig};
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let session = session_settings(
        &settings.session_key_file(),
        settings.session_cookie_secure,
        settings.session_allow_ephemeral,
        BuildMode::from_debug_assertions(),
    )
    .map_err(io::Error::other)?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| io::Error::other(format!("invalid bind address: {e}")))?;

    let mut config = ServerConfig::new(session.key, session.cookie_secure, bind_addr);
    if let Some(url) = settings.database_url() {
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(|e| io::Error::other(format!("database pool: {e}")))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; invoice writes are discarded");
    }
    if let Some(url) = settings.redis_url() {
        let cache = RedisViewCache::connect(url)
            .await
            .map_err(io::Error::other)?;
        config = config.with_view_cache(cache);
    }

    info!(%bind_addr, "starting dashboard server");
    create_server(config)?.await
}
