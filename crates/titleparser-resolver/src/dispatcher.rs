use jiff::{SignedDuration, Timestamp};
use std::sync::Arc;
use titleparser_core::{
    CacheEntry, Resolution, ResolveError, ResolveResult, Resolver, TitleCache, TitleQuery,
    DEFAULT_TTL,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::registry::Registry;

enum Outcome {
    Cached(Resolution),
    Resolved(Resolution),
}

/// Turns a [`TitleQuery`] into a [`Resolution`].
///
/// Consults the cache first, then the first registry binding matching the
/// URL, then the fallback resolver. Every fresh resolution, failed or not,
/// is written back to the cache for the configured TTL. Cache problems are
/// logged and never change what the caller gets back.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    fallback: Arc<dyn Resolver>,
    cache: Arc<dyn TitleCache>,
    ttl: SignedDuration,
    cache_lookup: bool,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("ttl", &self.ttl)
            .field("cache_lookup", &self.cache_lookup)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(
        registry: impl Into<Arc<Registry>>,
        fallback: impl Resolver,
        cache: impl TitleCache,
    ) -> Self {
        Self {
            registry: registry.into(),
            fallback: Arc::new(fallback),
            cache: Arc::new(cache),
            ttl: DEFAULT_TTL,
            cache_lookup: true,
        }
    }

    /// How long resolutions stay memoized. Defaults to [`DEFAULT_TTL`].
    pub fn with_ttl(mut self, ttl: SignedDuration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Whether to read the cache before resolving. Writes happen either way.
    pub fn with_cache_lookup(mut self, enabled: bool) -> Self {
        self.cache_lookup = enabled;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolves `query`, serving a cached result when one is still valid.
    ///
    /// Never fails: a failed resolution is reported through
    /// [`Resolution::error`].
    pub async fn handle(&self, query: TitleQuery) -> Resolution {
        match self.lookup_or_resolve(&query).await {
            Outcome::Cached(resolution) => resolution,
            Outcome::Resolved(resolution) => {
                self.memoize(&resolution).await;
                resolution
            }
        }
    }

    /// Like [`handle`](Self::handle), but gives up when `token` is cancelled.
    ///
    /// A cancelled call returns a [`ResolveError::Cancelled`] resolution and
    /// writes nothing to the cache.
    pub async fn handle_with_cancel(
        &self,
        query: TitleQuery,
        token: &CancellationToken,
    ) -> Resolution {
        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            outcome = self.lookup_or_resolve(&query) => Some(outcome),
        };

        match outcome {
            Some(Outcome::Cached(resolution)) => resolution,
            Some(Outcome::Resolved(resolution)) => {
                self.memoize(&resolution).await;
                resolution
            }
            None => {
                debug!(url = %query.url, "Resolution cancelled");
                Resolution::failure(
                    query,
                    ResolveError::Cancelled,
                    Timestamp::now(),
                    SignedDuration::ZERO,
                )
            }
        }
    }

    async fn lookup_or_resolve(&self, query: &TitleQuery) -> Outcome {
        if self.cache_lookup {
            if let Some(entry) = self.lookup(&query.url).await {
                return Outcome::Cached(Resolution::from_cache(query.clone(), entry));
            }
        }

        let result = self.resolve(&query.url).await;
        let now = Timestamp::now();
        let resolution = match result {
            Ok(title) => Resolution::success(query.clone(), title, now, self.ttl),
            Err(e) => Resolution::failure(query.clone(), e, now, self.ttl),
        };
        Outcome::Resolved(resolution)
    }

    async fn lookup(&self, url: &str) -> Option<CacheEntry> {
        match self.cache.get(url).await {
            Ok(Some(entry)) if entry.is_expired_at(Timestamp::now()) => {
                trace!(url = %url, "Cached entry expired");
                None
            }
            Ok(Some(entry)) => {
                debug!(url = %url, "Cache hit");
                Some(entry)
            }
            Ok(None) => {
                trace!(url = %url, "Cache miss");
                None
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Cache lookup failed, treating as miss");
                None
            }
        }
    }

    async fn resolve(&self, url: &str) -> ResolveResult<String> {
        let result = match self.registry.find(url) {
            Some(binding) => {
                debug!(url = %url, pattern = %binding.pattern(), "Resolving with matched resolver");
                binding.resolver().resolve(url).await
            }
            None => {
                debug!(url = %url, "No pattern matched, using fallback resolver");
                self.fallback.resolve(url).await
            }
        };

        if let Err(e) = &result {
            debug!(url = %url, code = e.code(), error = %e, "Resolution failed");
        }
        result
    }

    async fn memoize(&self, resolution: &Resolution) {
        let url = &resolution.query().url;
        let entry = CacheEntry::from(resolution);
        if let Err(e) = self.cache.put(url, &entry).await {
            warn!(url = %url, error = %e, "Failed to cache resolution");
        }
    }
}
