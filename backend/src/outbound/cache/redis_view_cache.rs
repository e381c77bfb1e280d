//! Redis-backed view cache using `bb8-redis`.
//!
//! Rendered views live under `view:<path>`. Invalidation deletes that key.
//! Connection and command failures are logged at warn level and dropped.

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use tracing::{debug, warn};

use crate::domain::ViewPath;
use crate::domain::ports::ViewCache;

const KEY_PREFIX: &str = "view:";

/// Errors raised while setting up the Redis pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedisViewCacheError {
    /// The connection URL was rejected.
    #[error("invalid redis url: {message}")]
    InvalidUrl { message: String },
    /// The pool could not be built.
    #[error("failed to build redis pool: {message}")]
    Build { message: String },
}

/// Deletes cached views from Redis.
#[derive(Clone)]
pub struct RedisViewCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisViewCache {
    /// Build a lazily connecting pool for `redis_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RedisViewCacheError::InvalidUrl`] when the URL does not
    /// parse.
    pub async fn connect(redis_url: &str) -> Result<Self, RedisViewCacheError> {
        let manager = RedisConnectionManager::new(redis_url).map_err(|err| {
            RedisViewCacheError::InvalidUrl {
                message: err.to_string(),
            }
        })?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(|err| RedisViewCacheError::Build {
                message: err.to_string(),
            })?;
        Ok(Self { pool })
    }

    /// Redis key holding the rendered view at `path`.
    pub fn key_for(path: &ViewPath) -> String {
        format!("{KEY_PREFIX}{path}")
    }
}

#[async_trait]
impl ViewCache for RedisViewCache {
    async fn invalidate(&self, path: &ViewPath) {
        let key = Self::key_for(path);
        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(err) => {
                warn!(%key, error = %err, "redis unavailable; view not invalidated");
                return;
            }
        };

        match conn.del::<_, i64>(key.as_str()).await {
            Ok(removed) => debug!(%key, removed, "view invalidated"),
            Err(err) => warn!(%key, error = %err, "redis DEL failed; view not invalidated"),
        }
    }
}
