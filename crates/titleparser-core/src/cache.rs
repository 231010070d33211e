use crate::error::{CacheError, ResolveError};
use crate::query::Resolution;
use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Type alias for cache results.
pub type Result<T> = std::result::Result<T, CacheError>;

/// How long a resolved title is memoized.
pub const DEFAULT_TTL: SignedDuration = SignedDuration::from_secs(86_400);

/// A memoized resolution, keyed by the raw URL string.
///
/// `added` and `ttl` are epoch seconds. The store is expected to drop the
/// entry once `ttl` has passed; readers treat an entry past its `ttl` as a
/// miss regardless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub title: String,
    pub added: i64,
    pub ttl: i64,
    /// Set when the memoized resolution was a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResolveError>,
}

impl CacheEntry {
    /// Whether the entry has reached its `ttl` at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now.as_second() >= self.ttl
    }

    /// Time left before the entry expires, or `None` if it already has.
    pub fn remaining_at(&self, now: Timestamp) -> Option<Duration> {
        let secs = self.ttl - now.as_second();
        (secs > 0).then(|| Duration::from_secs(secs.unsigned_abs()))
    }
}

impl From<&Resolution> for CacheEntry {
    fn from(resolution: &Resolution) -> Self {
        Self {
            title: resolution.title().to_string(),
            added: resolution.resolved_at().as_second(),
            ttl: resolution.expires_at().as_second(),
            error: resolution.error().cloned(),
        }
    }
}

/// A memoization store for resolved titles.
///
/// Implementations can use Redis, in-memory caches, or other storage
/// backends. Stores should drop entries once their `ttl` passes, but may
/// return stale ones; callers check [`CacheEntry::is_expired_at`].
#[async_trait]
pub trait TitleCache: Send + Sync + 'static {
    /// Get the memoized entry for `url`.
    ///
    /// Returns `Ok(None)` if the key is not in the cache.
    async fn get(&self, url: &str) -> Result<Option<CacheEntry>>;

    /// Store an entry for `url`. Best effort: callers log failures and
    /// carry on.
    async fn put(&self, url: &str, entry: &CacheEntry) -> Result<()>;
}

#[async_trait]
impl<C: TitleCache + ?Sized> TitleCache for std::sync::Arc<C> {
    async fn get(&self, url: &str) -> Result<Option<CacheEntry>> {
        (**self).get(url).await
    }

    async fn put(&self, url: &str, entry: &CacheEntry) -> Result<()> {
        (**self).put(url, entry).await
    }
}
