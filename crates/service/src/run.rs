use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ServiceError;

/// Summary of one reconciliation pass. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationRun {
    pub fetched: usize,
    pub inserted: usize,
    pub updated: usize,
    /// Titles of inserted or updated films, in feed order.
    pub titles: Vec<String>,
    pub errors: Vec<RecordError>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ReconciliationRun {
    pub(crate) fn begin(started_at: DateTime<Utc>, fetched: usize) -> Self {
        Self {
            fetched,
            inserted: 0,
            updated: 0,
            titles: Vec::with_capacity(fetched),
            errors: Vec::new(),
            started_at,
            finished_at: started_at,
        }
    }

    pub(crate) fn record_inserted(&mut self, title: String) {
        self.inserted = self.inserted.saturating_add(1);
        self.titles.push(title);
    }

    pub(crate) fn record_updated(&mut self, title: String) {
        self.updated = self.updated.saturating_add(1);
        self.titles.push(title);
    }

    pub(crate) fn record_error(&mut self, error: RecordError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Every fetched record was either written or reported.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.inserted.saturating_add(self.updated).saturating_add(self.errors.len())
            == self.fetched
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordErrorKind {
    Malformed,
    WriteFailed,
}

/// A feed record that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordError {
    /// Zero-based index in the snapshot.
    pub position: usize,
    pub episode_id: Option<i64>,
    pub title: Option<String>,
    pub kind: RecordErrorKind,
    pub reason: String,
}

impl RecordError {
    pub(crate) fn new(
        position: usize,
        episode_id: Option<i64>,
        title: Option<String>,
        error: &ServiceError,
    ) -> Self {
        let kind = match error {
            ServiceError::MalformedExternalRecord(_) => RecordErrorKind::Malformed,
            _ => RecordErrorKind::WriteFailed,
        };
        Self { position, episode_id, title, kind, reason: error.to_string() }
    }
}

/// Result of the most recent run, kept for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed(ReconciliationRun),
    Aborted { reason: String, started_at: DateTime<Utc>, finished_at: DateTime<Utc> },
}
