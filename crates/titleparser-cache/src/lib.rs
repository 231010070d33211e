//! Title cache implementations.
//!
//! Every cache here implements [`TitleCache`] from `titleparser_core`:
//!
//! - [`MokaTitleCache`]: in-process, honours each entry's own `ttl`.
//! - [`RedisTitleCache`]: durable, with Redis expiring keys at `ttl`.
//! - [`LayeredCache`]: a fast L1 in front of a slower L2, backfilling on L2 hits.
//! - [`NoopCache`]: never hits and drops writes, for running without memoization.

pub mod layered;
pub mod moka;
pub mod noop;
pub mod redis;

pub use layered::LayeredCache;
pub use noop::NoopCache;
pub use titleparser_core::cache::Result;
pub use titleparser_core::{CacheEntry, CacheError, TitleCache};

pub use self::moka::MokaTitleCache;
pub use self::redis::RedisTitleCache;
