//! Typed error enum for the feed crate.

use thiserror::Error;

/// Errors from feed fetch operations.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code} from {url}: {body}")]
    HttpStatus { code: u16, url: String, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid feed url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("pagination did not terminate after {0} pages")]
    TooManyPages(usize),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("feed fetch timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl FeedError {
    /// Whether this error is transient and the next scheduled run may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(_) | Self::Timeout(_) => true,
            Self::HttpStatus { code, .. } => matches!(code, 408 | 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}
