use thiserror::Error;

/// Errors raised while wiring resolvers together at startup.
///
/// None of these can happen while serving a request.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid header value for {header}: {message}")]
    InvalidHeader {
        header: &'static str,
        message: String,
    },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SetupError>;
