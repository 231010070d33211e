use crate::cache::CacheEntry;
use crate::error::ResolveError;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// A request to resolve the title of a URL.
///
/// `user` and `channel` identify where the URL was seen. They are carried
/// through to the [`Resolution`] untouched and never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TitleQuery {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub channel: String,
    pub url: String,
}

impl TitleQuery {
    /// Creates a query for a bare URL with no passthrough metadata.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// The outcome of handling a [`TitleQuery`].
///
/// The title is only meaningful on success. A failed resolution always
/// carries an empty title, so an empty title on its own does not tell
/// success from failure: check [`Resolution::error`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    query: TitleQuery,
    title: String,
    error: Option<ResolveError>,
    resolved_at: Timestamp,
    expires_at: Timestamp,
}

/// `resolved_at + ttl`, clamped to the representable range.
fn expiry(resolved_at: Timestamp, ttl: SignedDuration) -> Timestamp {
    resolved_at.checked_add(ttl).unwrap_or(if ttl.is_negative() {
        Timestamp::MIN
    } else {
        Timestamp::MAX
    })
}

impl Resolution {
    /// A successful resolution. `title` may legitimately be empty.
    pub fn success(
        query: TitleQuery,
        title: impl Into<String>,
        resolved_at: Timestamp,
        ttl: SignedDuration,
    ) -> Self {
        Self {
            query,
            title: title.into(),
            error: None,
            resolved_at,
            expires_at: expiry(resolved_at, ttl),
        }
    }

    /// A failed resolution. The title is cleared.
    pub fn failure(
        query: TitleQuery,
        error: ResolveError,
        resolved_at: Timestamp,
        ttl: SignedDuration,
    ) -> Self {
        Self {
            query,
            title: String::new(),
            error: Some(error),
            resolved_at,
            expires_at: expiry(resolved_at, ttl),
        }
    }

    /// Builds a resolution from a memoized cache entry.
    pub fn from_cache(query: TitleQuery, entry: CacheEntry) -> Self {
        let resolved_at = Timestamp::from_second(entry.added).unwrap_or(Timestamp::UNIX_EPOCH);
        let expires_at = Timestamp::from_second(entry.ttl).unwrap_or(resolved_at);
        let title = if entry.error.is_some() {
            String::new()
        } else {
            entry.title
        };

        Self {
            query,
            title,
            error: entry.error,
            resolved_at,
            expires_at,
        }
    }

    pub fn query(&self) -> &TitleQuery {
        &self.query
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The failure classification, if the resolution failed.
    pub fn error(&self) -> Option<&ResolveError> {
        self.error.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn resolved_at(&self) -> Timestamp {
        self.resolved_at
    }

    /// When a memoized copy of this resolution stops being valid.
    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Converts into a `Result`, dropping the timestamps.
    pub fn into_result(self) -> Result<String, ResolveError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.title),
        }
    }
}
