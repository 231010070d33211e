use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use typed_builder::TypedBuilder;

use crate::error::{Result, SetupError};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:107.0) Gecko/20100101 Firefox/107.0";
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "*";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// The request profile used for every outbound page fetch.
///
/// Browser-like headers make anti-scraping heuristics less likely to block
/// us. The profile is built once at startup and handed to each resolver
/// that needs it; it never changes afterwards.
#[derive(Debug, Clone, TypedBuilder)]
pub struct HttpConfig {
    #[builder(default = DEFAULT_USER_AGENT.to_string(), setter(into))]
    pub user_agent: String,
    #[builder(default = DEFAULT_ACCEPT.to_string(), setter(into))]
    pub accept: String,
    #[builder(default = DEFAULT_ACCEPT_LANGUAGE.to_string(), setter(into))]
    pub accept_language: String,
    /// Bound on the whole request, body included.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    /// Bodies are cut at this many bytes before parsing.
    #[builder(default = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl HttpConfig {
    fn header(name: &'static str, value: &str) -> Result<HeaderValue> {
        HeaderValue::from_str(value).map_err(|e| SetupError::InvalidHeader {
            header: name,
            message: e.to_string(),
        })
    }

    /// Default headers sent with every request.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, Self::header("user-agent", &self.user_agent)?);
        headers.insert(ACCEPT, Self::header("accept", &self.accept)?);
        headers.insert(
            ACCEPT_LANGUAGE,
            Self::header("accept-language", &self.accept_language)?,
        );
        Ok(headers)
    }

    /// Builds an HTTP client carrying this profile.
    pub fn client(&self) -> Result<Client> {
        let client = Client::builder()
            .default_headers(self.headers()?)
            .timeout(self.timeout)
            .build()?;
        Ok(client)
    }
}
