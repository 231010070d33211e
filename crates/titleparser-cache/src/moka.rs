use async_trait::async_trait;
use jiff::Timestamp;
use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};
use titleparser_core::{CacheEntry, TitleCache};
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

use crate::Result;

const DEFAULT_CAPACITY: u64 = 10_000;

/// Expires each entry at its own `ttl` timestamp.
struct EntryExpiry;

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.remaining_at(Timestamp::now()).unwrap_or(Duration::ZERO))
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.remaining_at(Timestamp::now()).unwrap_or(Duration::ZERO))
    }
}

/// An in-memory title cache using Moka.
///
/// Entries live until the `ttl` recorded in the entry itself, so a title
/// cached here expires at the same moment it would in the durable store.
/// Suitable for single-node deployments or as the L1 of a [`LayeredCache`].
///
/// [`LayeredCache`]: crate::LayeredCache
#[derive(Debug, Clone)]
pub struct MokaTitleCache {
    cache: Cache<String, CacheEntry>,
}

impl MokaTitleCache {
    /// Creates a new Moka title cache with default settings.
    ///
    /// The cache will have a default maximum capacity of 10,000 entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a new Moka title cache with a custom maximum capacity.
    pub fn with_capacity(max_capacity: u64) -> Self {
        CacheConfig::builder()
            .max_capacity(max_capacity)
            .build()
            .into()
    }

    /// Returns a builder for creating a custom cache configuration.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfig::builder()
    }
}

impl Default for MokaTitleCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TitleCache for MokaTitleCache {
    async fn get(&self, url: &str) -> Result<Option<CacheEntry>> {
        trace!(url = %url, "Fetching title from Moka cache");

        match self.cache.get(url).await {
            Some(entry) if !entry.is_expired_at(Timestamp::now()) => {
                debug!(url = %url, "Cache hit in Moka");
                Ok(Some(entry))
            }
            _ => {
                trace!(url = %url, "Cache miss in Moka");
                Ok(None)
            }
        }
    }

    async fn put(&self, url: &str, entry: &CacheEntry) -> Result<()> {
        trace!(url = %url, "Storing title in Moka cache");

        self.cache.insert(url.to_string(), entry.clone()).await;
        debug!(url = %url, "Cached title in Moka");
        Ok(())
    }
}

/// Configuration for creating a [`MokaTitleCache`] with custom settings.
#[derive(Debug, TypedBuilder, Default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold.
    #[builder(default, setter(strip_option))]
    max_capacity: Option<u64>,
    /// Upper bound on how long an entry stays, even if its own `ttl` is later.
    #[builder(default, setter(strip_option))]
    max_ttl: Option<Duration>,
}

impl From<CacheConfig> for MokaTitleCache {
    fn from(config: CacheConfig) -> Self {
        let mut builder = Cache::builder().expire_after(EntryExpiry);

        if let Some(capacity) = config.max_capacity {
            builder = builder.max_capacity(capacity);
        }

        if let Some(ttl) = config.max_ttl {
            builder = builder.time_to_live(ttl);
        }

        MokaTitleCache {
            cache: builder.build(),
        }
    }
}
