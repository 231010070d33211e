use async_trait::async_trait;
use titleparser_core::{CacheEntry, TitleCache};
use tracing::trace;

use crate::Result;

/// A cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl TitleCache for NoopCache {
    async fn get(&self, url: &str) -> Result<Option<CacheEntry>> {
        trace!(url = %url, "Caching disabled, reporting miss");
        Ok(None)
    }

    async fn put(&self, url: &str, _entry: &CacheEntry) -> Result<()> {
        trace!(url = %url, "Caching disabled, dropping write");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn never_hits_after_put() {
        let cache = NoopCache;
        let entry = CacheEntry {
            title: "Example".to_string(),
            added: 0,
            ttl: i64::MAX,
            error: None,
        };

        cache.put("https://example.com", &entry).await.unwrap();
        assert!(cache.get("https://example.com").await.unwrap().is_none());
    }
}
