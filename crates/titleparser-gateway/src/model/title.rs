use serde::{Deserialize, Serialize};
use titleparser_core::{Resolution, ResolveError, TitleQuery};

/// The record clients send and get back.
///
/// Only `url` is required on input. `timestamp`, `title`, `ttl` and `error`
/// are filled in from the resolution on the way out; `timestamp` and `ttl`
/// are epoch seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub channel: String,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl From<&ResolveError> for ErrorBody {
    fn from(error: &ResolveError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

impl TitleRecord {
    pub fn query(&self) -> TitleQuery {
        TitleQuery {
            user: self.user.clone(),
            channel: self.channel.clone(),
            url: self.url.clone(),
        }
    }
}

impl From<Resolution> for TitleRecord {
    fn from(resolution: Resolution) -> Self {
        let query = resolution.query();
        Self {
            timestamp: resolution.resolved_at().as_second(),
            user: query.user.clone(),
            channel: query.channel.clone(),
            url: query.url.clone(),
            title: resolution.title().to_string(),
            ttl: resolution.expires_at().as_second(),
            error: resolution.error().map(ErrorBody::from),
        }
    }
}
