//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Key namespace shared with any other Redis users.
const KEY_PREFIX: &str = "url:";

/// Redis cache for redirect lookups.
///
/// Uses `ConnectionManager` for automatic reconnection. All operations are
/// fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::ConnectionError(format!("Invalid Redis URL: {}", e)))?;

        let mut conn = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        conn.ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");
        Ok(Self { conn })
    }

    fn key(&self, short_code: &str) -> String {
        format!("{KEY_PREFIX}{short_code}")
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();

        let cached = conn
            .get::<_, Option<String>>(self.key(short_code))
            .await
            .unwrap_or_else(|e| {
                warn!("Redis GET error for {}: {}", short_code, e);
                None
            });

        debug!(
            "Cache {}: {}",
            if cached.is_some() { "HIT" } else { "MISS" },
            short_code
        );
        Ok(cached)
    }

    async fn set_url(
        &self,
        short_code: &str,
        target_url: &str,
        ttl_seconds: u64,
    ) -> CacheResult<()> {
        // SET EX rejects a zero expiry
        if ttl_seconds == 0 {
            return Ok(());
        }

        let mut conn = self.conn.clone();
        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.key(short_code), target_url, ttl_seconds)
            .await
        {
            warn!("Redis SET error for {}: {}", short_code, e);
        } else {
            debug!("Cache SET: {} (TTL: {}s)", short_code, ttl_seconds);
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}
