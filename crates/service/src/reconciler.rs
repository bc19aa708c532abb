//! Folds the external feed snapshot into the catalog.
//!
//! Each record is upserted by its episode number. Films without an episode
//! number never match a merge filter, so user-authored films are left alone.
//! Nothing is ever deleted.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reelsync_core::{FeedFilm, Film};
use reelsync_feed::{FeedError, FilmFeed};
use reelsync_storage::{FilmStore, StorageError};
use tokio::sync::{Mutex, RwLock};

use crate::run::{ReconciliationRun, RecordError, RunOutcome};
use crate::{ServiceError, SyncConfig};

enum Applied {
    Inserted(Film),
    Updated(Film),
}

pub struct Reconciler {
    store: Arc<dyn FilmStore>,
    feed: Arc<dyn FilmFeed>,
    feed_timeout: Duration,
    write_timeout: Duration,
    /// Held for the whole run body. A second trigger waits here.
    run_lock: Mutex<()>,
    last_run: RwLock<Option<RunOutcome>>,
}

impl Reconciler {
    #[must_use]
    pub fn new(store: Arc<dyn FilmStore>, feed: Arc<dyn FilmFeed>, config: &SyncConfig) -> Self {
        Self {
            store,
            feed,
            feed_timeout: config.feed_timeout,
            write_timeout: config.write_timeout,
            run_lock: Mutex::new(()),
            last_run: RwLock::new(None),
        }
    }

    /// Run one reconciliation pass.
    ///
    /// Returns `FeedUnavailable` without writing anything if the snapshot
    /// cannot be fetched. Per-record failures are collected in the returned
    /// run and do not stop the pass.
    pub async fn reconcile(&self) -> Result<ReconciliationRun, ServiceError> {
        let _guard = self.run_lock.lock().await;
        let started_at = Utc::now();
        tracing::info!(source = self.feed.source(), "Reconciliation started");

        let snapshot = match self.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, "Reconciliation aborted: feed unavailable");
                self.set_last_run(RunOutcome::Aborted {
                    reason: e.to_string(),
                    started_at,
                    finished_at: Utc::now(),
                })
                .await;
                return Err(ServiceError::FeedUnavailable(e));
            },
        };

        let mut run = ReconciliationRun::begin(started_at, snapshot.len());
        tracing::debug!(fetched = run.fetched, "Feed snapshot received");

        for (position, record) in snapshot.into_iter().enumerate() {
            let episode_id = record.episode_number();
            let title = record.title.clone();
            match self.apply_record(record).await {
                Ok(Applied::Inserted(film)) => {
                    tracing::debug!(episode_id, title = %film.title, "Inserted external film");
                    run.record_inserted(film.title);
                },
                Ok(Applied::Updated(film)) => {
                    tracing::debug!(episode_id, title = %film.title, "Updated external film");
                    run.record_updated(film.title);
                },
                Err(e) => {
                    tracing::warn!(position, episode_id, error = %e, "Feed record skipped");
                    run.record_error(RecordError::new(position, episode_id, title, &e));
                },
            }
        }

        run.finished_at = Utc::now();
        tracing::info!(
            fetched = run.fetched,
            inserted = run.inserted,
            updated = run.updated,
            errors = run.error_count(),
            "Reconciliation completed"
        );
        self.set_last_run(RunOutcome::Completed(run.clone())).await;
        Ok(run)
    }

    /// Outcome of the most recent finished run, if any.
    pub async fn last_run(&self) -> Option<RunOutcome> {
        self.last_run.read().await.clone()
    }

    /// Whether a run currently holds the lock.
    pub fn is_running(&self) -> bool {
        self.run_lock.try_lock().is_err()
    }

    async fn fetch_snapshot(&self) -> Result<Vec<FeedFilm>, FeedError> {
        tokio::time::timeout(self.feed_timeout, self.feed.fetch_snapshot())
            .await
            .map_err(|_| FeedError::Timeout(self.feed_timeout))?
    }

    /// The timeout drops the write future, but a backend that already
    /// committed keeps the row. Such a record is reported `WriteFailed`
    /// although stored; the next run sees it and counts an update.
    async fn apply_record(&self, record: FeedFilm) -> Result<Applied, ServiceError> {
        let (filter, input) = record.into_input()?;

        let write = async {
            let existing = self.store.find_one_by_filter(&filter).await?;
            let film = self.store.upsert_by_filter(&filter, input).await?;
            Ok::<_, StorageError>((existing.is_some(), film))
        };

        match tokio::time::timeout(self.write_timeout, write).await {
            Ok(Ok((true, film))) => Ok(Applied::Updated(film)),
            Ok(Ok((false, film))) => Ok(Applied::Inserted(film)),
            Ok(Err(e)) => Err(ServiceError::RecordWriteFailed {
                episode_id: filter.episode_id,
                reason: e.to_string(),
            }),
            Err(_) => Err(ServiceError::RecordWriteFailed {
                episode_id: filter.episode_id,
                reason: format!("write timed out after {:?}", self.write_timeout),
            }),
        }
    }

    async fn set_last_run(&self, outcome: RunOutcome) {
        *self.last_run.write().await = Some(outcome);
    }
}
