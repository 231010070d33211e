//! Core types and traits for the titleparser service.
//!
//! This crate provides the data model shared by the resolver, cache and
//! gateway crates: queries and resolutions, the [`Resolver`] contract every
//! title extraction strategy implements, the [`TitleCache`] contract for the
//! memoization store, and the [`sanitize`] function applied to every title.

pub mod cache;
pub mod error;
pub mod query;
pub mod resolver;
pub mod sanitize;

pub use cache::{CacheEntry, TitleCache, DEFAULT_TTL};
pub use error::{CacheError, HttpStatusError, ResolveError, ResolveResult};
pub use query::{Resolution, TitleQuery};
pub use resolver::{resolver_fn, Resolver, ResolverFn};
pub use sanitize::{sanitize, MAX_TITLE_CHARS, TRUNCATION_MARKER};
