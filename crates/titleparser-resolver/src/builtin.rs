//! The resolvers every deployment starts with.

use async_trait::async_trait;
use titleparser_core::{ResolveResult, Resolver};
use tracing::trace;

use crate::error::Result;
use crate::extractor::GenericExtractor;
use crate::registry::Registry;

/// Sites whose titles are never worth announcing.
pub const SILENT_PATTERNS: [&str; 3] = [r"apina\.biz", r"pr0gramm\.com", r"twitter\.com"];

pub const THE_REGISTER_PATTERN: &str = r"^https?://([^/]+\.)?theregister\.com(/|$)";

/// Succeeds with an empty title without touching the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

#[async_trait]
impl Resolver for Silent {
    async fn resolve(&self, url: &str) -> ResolveResult<String> {
        trace!(url = %url, "Silenced URL");
        Ok(String::new())
    }
}

/// Registers the builtin bindings, in order.
///
/// `extractor` is the configured page extractor; sites that only need the
/// standard HTML pipeline get a clone of it so they share its HTTP profile.
pub fn register_builtin(registry: &mut Registry, extractor: &GenericExtractor) -> Result<()> {
    for pattern in SILENT_PATTERNS {
        registry.register(pattern, Silent)?;
    }
    registry.register(THE_REGISTER_PATTERN, extractor.clone())?;
    Ok(())
}
