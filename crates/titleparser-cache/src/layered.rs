use async_trait::async_trait;
use titleparser_core::{CacheEntry, TitleCache};
use tracing::{debug, trace, warn};

use crate::Result;

/// A multi-layer cache that composes two cache implementations.
///
/// L1 is typically a fast, local cache ([`MokaTitleCache`]) and L2 a slower,
/// shared one ([`RedisTitleCache`]).
///
/// # Operation Strategy
///
/// - **Get**: Try L1 first, if miss try L2. If L2 has the entry, populate L1
///   with it (cache-aside pattern with backfill).
/// - **Put**: Write to both L2 and L1 (write-through pattern).
///
/// Entries carry their own `ttl`, so a backfilled L1 copy expires together
/// with the L2 original.
///
/// [`MokaTitleCache`]: crate::MokaTitleCache
/// [`RedisTitleCache`]: crate::RedisTitleCache
#[derive(Debug, Clone)]
pub struct LayeredCache<L1, L2> {
    l1: L1,
    l2: L2,
}

impl<L1, L2> LayeredCache<L1, L2> {
    /// Creates a new layered cache with the given L1 and L2 caches.
    pub fn new(l1: L1, l2: L2) -> Self {
        Self { l1, l2 }
    }

    /// Returns a reference to the L1 cache.
    pub fn l1(&self) -> &L1 {
        &self.l1
    }

    /// Returns a reference to the L2 cache.
    pub fn l2(&self) -> &L2 {
        &self.l2
    }
}

#[async_trait]
impl<L1, L2> TitleCache for LayeredCache<L1, L2>
where
    L1: TitleCache,
    L2: TitleCache,
{
    async fn get(&self, url: &str) -> Result<Option<CacheEntry>> {
        trace!(url = %url, "Fetching title from layered cache");

        match self.l1.get(url).await {
            Ok(Some(entry)) => {
                debug!(url = %url, "L1 cache hit");
                return Ok(Some(entry));
            }
            Ok(None) => trace!(url = %url, "L1 cache miss, trying L2"),
            Err(e) => warn!(url = %url, error = %e, "L1 cache failed, trying L2"),
        }

        match self.l2.get(url).await? {
            Some(entry) => {
                debug!(url = %url, "L2 cache hit, backfilling L1");
                // L2 hit is already a success
                if let Err(e) = self.l1.put(url, &entry).await {
                    warn!(url = %url, error = %e, "Failed to backfill L1");
                }
                Ok(Some(entry))
            }
            None => {
                trace!(url = %url, "L2 cache miss");
                Ok(None)
            }
        }
    }

    async fn put(&self, url: &str, entry: &CacheEntry) -> Result<()> {
        trace!(url = %url, "Storing title in layered cache");

        // L2 first (slower, more durable), then L1
        let l2 = self.l2.put(url, entry).await;
        if l2.is_ok() {
            debug!(url = %url, "Stored in L2 cache");
        }

        self.l1.put(url, entry).await?;
        debug!(url = %url, "Stored in L1 cache");

        l2
    }
}
