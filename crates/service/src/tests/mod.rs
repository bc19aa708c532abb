//! Test doubles and module declarations for service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reelsync_core::{FeedFilm, Film, FilmInput, FilmPatch, MergeFilter};
use reelsync_feed::{FeedError, FilmFeed};
use reelsync_storage::{FilmStore, MemoryStorage, StorageError};

use crate::{Reconciler, SyncConfig};

mod feed_pipeline_tests;

/// Feed serving a replaceable in-memory snapshot.
#[derive(Default)]
pub struct StaticFeed {
    snapshot: Mutex<Vec<FeedFilm>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl StaticFeed {
    pub fn new(snapshot: Vec<FeedFilm>) -> Self {
        Self { snapshot: Mutex::new(snapshot), ..Self::default() }
    }

    pub fn with_delay(snapshot: Vec<FeedFilm>, delay: Duration) -> Self {
        Self { delay: Some(delay), ..Self::new(snapshot) }
    }

    pub fn set_snapshot(&self, snapshot: Vec<FeedFilm>) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FilmFeed for StaticFeed {
    async fn fetch_snapshot(&self) -> Result<Vec<FeedFilm>, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(self.snapshot.lock().unwrap().clone())
    }

    fn source(&self) -> &str {
        "static"
    }
}

/// Feed that always answers 503.
pub struct DownFeed;

#[async_trait]
impl FilmFeed for DownFeed {
    async fn fetch_snapshot(&self) -> Result<Vec<FeedFilm>, FeedError> {
        Err(FeedError::HttpStatus {
            code: 503,
            url: "http://feed.test/api/films".to_owned(),
            body: "maintenance".to_owned(),
        })
    }

    fn source(&self) -> &str {
        "down"
    }
}

enum Fault {
    Fail,
    Stall(Duration),
}

/// In-memory store that fails or stalls upserts for chosen episodes.
pub struct FaultyStore {
    inner: MemoryStorage,
    faults: HashMap<i64, Fault>,
}

impl FaultyStore {
    pub fn new(inner: MemoryStorage) -> Self {
        Self { inner, faults: HashMap::new() }
    }

    pub fn failing_on(mut self, episode_id: i64) -> Self {
        self.faults.insert(episode_id, Fault::Fail);
        self
    }

    pub fn stalling_on(mut self, episode_id: i64, delay: Duration) -> Self {
        self.faults.insert(episode_id, Fault::Stall(delay));
        self
    }
}

#[async_trait]
impl FilmStore for FaultyStore {
    async fn find_one_by_filter(&self, filter: &MergeFilter) -> Result<Option<Film>, StorageError> {
        self.inner.find_one_by_filter(filter).await
    }

    async fn upsert_by_filter(
        &self,
        filter: &MergeFilter,
        input: FilmInput,
    ) -> Result<Film, StorageError> {
        match self.faults.get(&filter.episode_id) {
            Some(Fault::Fail) => {
                return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
            },
            Some(Fault::Stall(delay)) => tokio::time::sleep(*delay).await,
            None => {},
        }
        self.inner.upsert_by_filter(filter, input).await
    }

    async fn create_film(&self, input: FilmInput) -> Result<Film, StorageError> {
        self.inner.create_film(input).await
    }

    async fn get_film(&self, id: &str) -> Result<Option<Film>, StorageError> {
        self.inner.get_film(id).await
    }

    async fn list_films(&self, limit: usize) -> Result<Vec<Film>, StorageError> {
        self.inner.list_films(limit).await
    }

    async fn update_film(&self, id: &str, patch: FilmPatch) -> Result<Film, StorageError> {
        self.inner.update_film(id, patch).await
    }

    async fn delete_film(&self, id: &str) -> Result<bool, StorageError> {
        self.inner.delete_film(id).await
    }

    async fn exists_by_title(
        &self,
        title: &str,
        excluding_id: Option<&str>,
    ) -> Result<bool, StorageError> {
        self.inner.exists_by_title(title, excluding_id).await
    }

    async fn count_films(&self) -> Result<u64, StorageError> {
        self.inner.count_films().await
    }
}

pub fn snapshot(entries: &[(i64, &str)]) -> Vec<FeedFilm> {
    entries.iter().map(|(episode, title)| FeedFilm::new(*episode, *title)).collect()
}

pub fn local_input(title: &str) -> FilmInput {
    FilmInput {
        title: title.to_owned(),
        opening_crawl: "A long time ago, in a garage not far away".to_owned(),
        director: "A Fan".to_owned(),
        producer: "Another Fan".to_owned(),
        ..FilmInput::default()
    }
}

pub fn test_config() -> SyncConfig {
    SyncConfig {
        feed_url: "http://feed.test/api/films".to_owned(),
        interval: Duration::from_secs(60),
        feed_timeout: Duration::from_secs(5),
        write_timeout: Duration::from_secs(1),
        run_on_startup: true,
    }
}

pub fn reconciler(store: Arc<dyn FilmStore>, feed: Arc<dyn FilmFeed>) -> Reconciler {
    Reconciler::new(store, feed, &test_config())
}
