//! Client for the external film feed.
//!
//! The feed is the source of record for externally-sourced films. One call
//! to [`FilmFeed::fetch_snapshot`] returns the complete, ordered catalog.

mod api_types;
mod client;
mod error;

use async_trait::async_trait;
use reelsync_core::FeedFilm;

pub use client::{FeedClient, truncate};
pub use error::FeedError;

/// Source of the canonical film list.
#[async_trait]
pub trait FilmFeed: Send + Sync {
    /// Fetch the full snapshot in feed order.
    ///
    /// # Errors
    /// Any network failure, non-success status, or undecodable body.
    async fn fetch_snapshot(&self) -> Result<Vec<FeedFilm>, FeedError>;

    /// Where the snapshot comes from, for logs.
    fn source(&self) -> &str;
}
