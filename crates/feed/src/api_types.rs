use reelsync_core::FeedFilm;
use serde::Deserialize;

/// One page of the SWAPI list response. Entries stay raw so a bad entry
/// does not fail the page.
#[derive(Deserialize)]
pub(crate) struct FilmPage {
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<serde_json::Value>,
}

/// Paginated SWAPI envelope, or a bare array as served by some mirrors.
pub(crate) enum FilmPayload {
    Page { next: Option<String>, films: Vec<FeedFilm> },
    List(Vec<FeedFilm>),
}

impl FilmPayload {
    /// Picks the shape from the top-level JSON type, so a decode error
    /// points at the real problem instead of "no variant matched".
    pub(crate) fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if value.is_array() {
            let entries: Vec<serde_json::Value> = serde_json::from_value(value)?;
            return Ok(Self::List(entries.into_iter().map(FeedFilm::from_json).collect()));
        }
        let page: FilmPage = serde_json::from_value(value)?;
        Ok(Self::Page {
            next: page.next,
            films: page.results.into_iter().map(FeedFilm::from_json).collect(),
        })
    }
}
