//! The fallback resolver: fetch a page and read its title from the HTML.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use scraper::{Html, Selector};
use titleparser_core::{sanitize, HttpStatusError, ResolveError, ResolveResult, Resolver};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::http::HttpConfig;

/// Resolves any URL by fetching it and reading the page's metadata.
///
/// The title is taken from `<meta property="og:title">` when present and
/// non-empty, otherwise from the first `<title>` element. Non-HTML
/// responses and non-200 statuses fail with their own classification.
#[derive(Debug, Clone)]
pub struct GenericExtractor {
    client: Client,
    max_body_bytes: usize,
}

impl GenericExtractor {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: config.client()?,
            max_body_bytes: config.max_body_bytes,
        })
    }

    async fn fetch(&self, url: &str) -> ResolveResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_fetch_error(url, e))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.to_ascii_lowercase().starts_with("text/html") {
            debug!(url = %url, content_type = %content_type, "Not an HTML page");
            return Err(ResolveError::NotHtml(content_type));
        }

        let status = response.status().as_u16();
        if let Err(e) = HttpStatusError::classify(status) {
            warn!(url = %url, status, "Page fetch returned an error status");
            return Err(e.into());
        }

        self.read_body(url, response).await
    }

    async fn read_body(&self, url: &str, mut response: Response) -> ResolveResult<String> {
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| map_fetch_error(url, e))?
        {
            let room = self.max_body_bytes - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                debug!(url = %url, limit = self.max_body_bytes, "Body truncated at size limit");
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl Resolver for GenericExtractor {
    async fn resolve(&self, url: &str) -> ResolveResult<String> {
        trace!(url = %url, "Fetching page for title extraction");
        let html = self.fetch(url).await?;
        extract_title(&html)
    }
}

fn map_fetch_error(url: &str, err: reqwest::Error) -> ResolveError {
    if err.is_timeout() {
        warn!(url = %url, "Page fetch timed out");
        ResolveError::Timeout
    } else {
        warn!(url = %url, error = %err, "Page fetch failed");
        ResolveError::internal(format!("fetching {url}: {err}"))
    }
}

fn first_match<'a>(document: &'a Html, css: &str) -> Option<scraper::ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Picks the display title out of an HTML document and sanitizes it.
///
/// Prefers a non-empty `og:title`, falls back to the first non-empty
/// `<title>`.
pub fn extract_title(html: &str) -> ResolveResult<String> {
    let document = Html::parse_document(html);

    let og_title = first_match(&document, r#"meta[property="og:title"]"#)
        .and_then(|meta| meta.value().attr("content"))
        .map(sanitize)
        .filter(|title| !title.is_empty());
    if let Some(title) = og_title {
        return Ok(title);
    }

    first_match(&document, "title")
        .map(|title| sanitize(&title.text().collect::<String>()))
        .filter(|title| !title.is_empty())
        .ok_or(ResolveError::TitleNotFound)
}
