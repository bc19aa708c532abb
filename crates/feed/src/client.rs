use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reelsync_core::{FeedFilm, MAX_FEED_PAGES};

use crate::FilmFeed;
use crate::api_types::FilmPayload;
use crate::error::FeedError;

/// HTTP client for a SWAPI-compatible film list.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    url: String,
}

impl FeedClient {
    /// Creates a client for the given list URL.
    ///
    /// `timeout` bounds each individual page request; the caller bounds the
    /// whole snapshot.
    ///
    /// # Errors
    /// Returns an error if the URL is not http(s) or the HTTP client cannot be
    /// built (TLS backend failure).
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| FeedError::InvalidUrl { url: url.to_owned(), reason: e.to_string() })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FeedError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("reelsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeedError::ClientInit(e.to_string()))?;
        Ok(Self { client, url: url.to_owned() })
    }

    async fn fetch_page(&self, page_url: &str) -> Result<FilmPayload, FeedError> {
        let response =
            self.client.get(page_url).header("Accept", "application/json").send().await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(FeedError::HttpStatus {
                code: status.as_u16(),
                url: page_url.to_owned(),
                body: truncate(&body, 200).to_owned(),
            });
        }

        let body = response.text().await?;
        FilmPayload::from_body(&body).map_err(|e| FeedError::JsonParse {
            context: format!("film list page {page_url} (body: {})", truncate(&body, 200)),
            source: e,
        })
    }
}

#[async_trait]
impl FilmFeed for FeedClient {
    async fn fetch_snapshot(&self) -> Result<Vec<FeedFilm>, FeedError> {
        let mut films = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(self.url.clone());

        while let Some(page_url) = next.take() {
            if visited.len() >= MAX_FEED_PAGES || !visited.insert(page_url.clone()) {
                return Err(FeedError::TooManyPages(visited.len()));
            }
            match self.fetch_page(&page_url).await? {
                FilmPayload::Page { next: next_page, films: page } => {
                    films.extend(page);
                    next = next_page.filter(|n| !n.trim().is_empty());
                },
                FilmPayload::List(list) => films.extend(list),
            }
        }

        tracing::debug!(pages = visited.len(), films = films.len(), url = %self.url, "feed snapshot fetched");
        Ok(films)
    }

    fn source(&self) -> &str {
        &self.url
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
