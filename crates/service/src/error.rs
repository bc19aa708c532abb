//! Typed error enum for the service layer.
//!
//! Unifies storage and feed failures with the catalog's own validation and
//! per-record reconciliation failures.

use reelsync_core::MalformedRecord;
use reelsync_feed::FeedError;
use reelsync_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Feed could not produce a snapshot. Aborts the whole run.
    #[error("feed unavailable: {0}")]
    FeedUnavailable(#[from] FeedError),

    /// Caller provided invalid input (empty title, bad url).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Another film already uses this title.
    #[error("a film titled {0:?} already exists")]
    DuplicateTitle(String),

    #[error("film {0} not found")]
    NotFound(String),

    /// Upsert of one feed record failed or timed out.
    #[error("write failed for episode {episode_id}: {reason}")]
    RecordWriteFailed { episode_id: i64, reason: String },

    /// Feed record cannot be mapped onto a film.
    #[error("malformed feed record: {0}")]
    MalformedExternalRecord(#[from] MalformedRecord),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::FeedUnavailable(e) => e.is_transient(),
            Self::RecordWriteFailed { .. } => true,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Storage(StorageError::NotFound { .. }))
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateTitle(_)) || matches!(self, Self::Storage(e) if e.is_duplicate())
    }
}
