use async_trait::async_trait;
use jiff::Timestamp;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use titleparser_core::{CacheEntry, CacheError, TitleCache};
use tracing::{debug, trace, warn};

use crate::Result;

/// Keys are the bare URL unless a prefix is configured.
const DEFAULT_KEY_PREFIX: &str = "";

/// A Redis-based implementation of [`TitleCache`].
///
/// Entries are stored as JSON strings (`{ title, added, ttl }`) keyed by the
/// raw URL, optionally behind a key prefix. Each key is written with an
/// expiry matching the entry's `ttl`, so Redis drops stale titles itself.
#[derive(Clone)]
pub struct RedisTitleCache {
    conn: ConnectionManager,
    key_prefix: String,
}

impl std::fmt::Debug for RedisTitleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisTitleCache")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> CacheError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        CacheError::Timeout(message)
    } else if err.is_connection_dropped() || err.is_connection_refusal() {
        CacheError::Unavailable(message)
    } else {
        CacheError::Operation(message)
    }
}

impl RedisTitleCache {
    /// Creates a new Redis title cache on top of an established connection.
    pub fn new(conn: ConnectionManager) -> Self {
        Self::with_prefix(conn, DEFAULT_KEY_PREFIX)
    }

    /// Creates a new Redis title cache with a custom key prefix.
    ///
    /// # Arguments
    ///
    /// * `conn` - A managed Redis connection
    /// * `key_prefix` - Custom prefix for cache keys (e.g., "myapp:title:")
    pub fn with_prefix(conn: ConnectionManager, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Replaces the key prefix, keeping the connection.
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    /// Opens a managed connection to `redis_url` and wraps it.
    ///
    /// The connection manager reconnects on its own after the initial
    /// connection succeeds; failures after that surface as cache errors.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| CacheError::Unavailable(format!("invalid redis url: {e}")))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| map_redis_error("failed to connect to Redis", e))?;
        Ok(Self::new(conn))
    }

    fn cache_key(&self, url: &str) -> String {
        format!("{}{}", self.key_prefix, url)
    }
}

#[async_trait]
impl TitleCache for RedisTitleCache {
    async fn get(&self, url: &str) -> Result<Option<CacheEntry>> {
        let key = self.cache_key(url);
        trace!(url = %url, "Fetching title from Redis cache");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(cached)) => match serde_json::from_str::<CacheEntry>(&cached) {
                Ok(entry) => {
                    debug!(url = %url, "Cache hit in Redis");
                    Ok(Some(entry))
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Failed to deserialize cached title");
                    Err(CacheError::InvalidData(format!(
                        "invalid cached value for key '{key}': {e}"
                    )))
                }
            },
            Ok(None) => {
                trace!(url = %url, "Cache miss in Redis");
                Ok(None)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Redis error on get");
                Err(map_redis_error("failed to fetch value from Redis", e))
            }
        }
    }

    async fn put(&self, url: &str, entry: &CacheEntry) -> Result<()> {
        let key = self.cache_key(url);
        trace!(url = %url, "Storing title in Redis cache");

        let Some(remaining) = entry.remaining_at(Timestamp::now()) else {
            debug!(url = %url, ttl = entry.ttl, "Entry already expired, not caching");
            return Ok(());
        };

        let json = serde_json::to_string(entry).map_err(|e| {
            warn!(url = %url, error = %e, "Failed to serialize entry for caching");
            CacheError::Serialization(format!("failed to serialize cache value: {e}"))
        })?;

        let mut conn = self.conn.clone();
        match conn
            .set_ex::<_, _, ()>(&key, json, remaining.as_secs().max(1))
            .await
        {
            Ok(()) => {
                debug!(url = %url, expires_in = remaining.as_secs(), "Cached title in Redis");
                Ok(())
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to cache title in Redis");
                Err(map_redis_error("failed to write value to Redis", e))
            }
        }
    }
}
