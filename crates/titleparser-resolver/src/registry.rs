use regex::Regex;
use std::sync::Arc;
use titleparser_core::Resolver;
use tracing::debug;

use crate::error::{Result, SetupError};

/// A pattern bound to the resolver that handles matching URLs.
pub struct Binding {
    pattern: Regex,
    resolver: Arc<dyn Resolver>,
}

impl Binding {
    /// The pattern source as it was registered.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn resolver(&self) -> &Arc<dyn Resolver> {
        &self.resolver
    }

    pub fn matches(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Ordered pattern-to-resolver bindings.
///
/// Patterns are regular expressions searched anywhere in the URL; anchor
/// them explicitly to match the whole string. When several patterns match,
/// the earliest registered binding wins.
///
/// The registry is populated before serving starts and then shared
/// read-only, usually behind an `Arc`.
#[derive(Debug, Default)]
pub struct Registry {
    bindings: Vec<Binding>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a binding. Fails immediately if `pattern` does not compile.
    pub fn register<R: Resolver>(&mut self, pattern: &str, resolver: R) -> Result<&mut Self> {
        let regex = Regex::new(pattern).map_err(|source| SetupError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        debug!(pattern = %pattern, position = self.bindings.len(), "Registered resolver");
        self.bindings.push(Binding {
            pattern: regex,
            resolver: Arc::new(resolver),
        });
        Ok(self)
    }

    /// The binding that handles `url`: the first registered one that matches.
    pub fn find(&self, url: &str) -> Option<&Binding> {
        self.bindings.iter().find(|binding| binding.matches(url))
    }

    /// Every binding matching `url`, in registration order.
    pub fn candidates<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a Binding> + 'a {
        self.bindings.iter().filter(move |binding| binding.matches(url))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
