use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a single title resolution.
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

/// Non-success HTTP statuses a page fetch can end in.
///
/// The recognized codes each get their own variant so callers can tell a
/// blocked request from a missing page; anything else lands in [`Unknown`].
///
/// [`Unknown`]: HttpStatusError::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HttpStatusError {
    #[error("forbidden (403)")]
    Forbidden,
    #[error("not found (404)")]
    NotFound,
    #[error("method not allowed (405)")]
    MethodNotAllowed,
    #[error("too many requests (429)")]
    TooManyRequests,
    #[error("internal server error (500)")]
    InternalServerError,
    #[error("bad gateway (502)")]
    BadGateway,
    #[error("unexpected HTTP status {0}")]
    Unknown(u16),
}

impl HttpStatusError {
    /// Classifies an HTTP status code. Only `200` counts as success.
    pub fn classify(status: u16) -> Result<(), Self> {
        match status {
            200 => Ok(()),
            403 => Err(Self::Forbidden),
            404 => Err(Self::NotFound),
            405 => Err(Self::MethodNotAllowed),
            429 => Err(Self::TooManyRequests),
            500 => Err(Self::InternalServerError),
            502 => Err(Self::BadGateway),
            other => Err(Self::Unknown(other)),
        }
    }

    /// Stable machine-readable classification.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Forbidden => "forbidden",
            Self::NotFound => "not-found",
            Self::MethodNotAllowed => "method-not-allowed",
            Self::TooManyRequests => "rate-limited",
            Self::InternalServerError => "server-error",
            Self::BadGateway => "bad-gateway",
            Self::Unknown(_) => "http-error",
        }
    }
}

/// Classified failure of a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum ResolveError {
    #[error("source url is not HTML (content-type: {0:?})")]
    NotHtml(String),
    #[error("{0}")]
    Http(#[from] HttpStatusError),
    #[error("no title found from url")]
    TitleNotFound,
    #[error("request timed out")]
    Timeout,
    #[error("resolution was cancelled")]
    Cancelled,
    #[error("resolver failed: {0}")]
    Internal(String),
}

impl ResolveError {
    /// Builds a resolver-internal failure from anything displayable.
    pub fn internal(message: impl std::fmt::Display) -> Self {
        Self::Internal(message.to_string())
    }

    /// Stable machine-readable classification, suitable for wire formats.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotHtml(_) => "not-html",
            Self::Http(status) => status.code(),
            Self::TitleNotFound => "title-not-found",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
            Self::Internal(_) => "resolver-error",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache operation timed out: {0}")]
    Timeout(String),
    #[error("cache serialization failed: {0}")]
    Serialization(String),
    #[error("cache value is invalid: {0}")]
    InvalidData(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}
