//! In-memory FilmStore.
//!
//! One `RwLock` guards both the records and the episode index, so every
//! operation, upsert included, is atomic with respect to its filter.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reelsync_core::{Film, FilmInput, FilmPatch, MergeFilter};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::FilmStore;

#[derive(Debug, Default)]
struct Inner {
    films: HashMap<String, Film>,
    by_episode: HashMap<i64, String>,
}

impl Inner {
    fn insert(&mut self, film: Film) -> Result<Film, StorageError> {
        if let Some(episode_id) = film.episode_id {
            if self.by_episode.contains_key(&episode_id) {
                return Err(StorageError::Duplicate(format!("episode_id {episode_id} already exists")));
            }
            self.by_episode.insert(episode_id, film.id.clone());
        }
        self.films.insert(film.id.clone(), film.clone());
        Ok(film)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FilmStore for MemoryStorage {
    async fn find_one_by_filter(&self, filter: &MergeFilter) -> Result<Option<Film>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner.by_episode.get(&filter.episode_id).and_then(|id| inner.films.get(id)).cloned())
    }

    async fn upsert_by_filter(
        &self,
        filter: &MergeFilter,
        mut input: FilmInput,
    ) -> Result<Film, StorageError> {
        input.episode_id = Some(filter.episode_id);
        input.is_external = true;
        let now = Utc::now();
        let mut inner = self.inner.write().await;

        let existing_id = inner.by_episode.get(&filter.episode_id).cloned();
        if let Some(id) = existing_id {
            if let Some(film) = inner.films.get_mut(&id) {
                film.overwrite(input, now);
                return Ok(film.clone());
            }
            tracing::warn!(episode_id = filter.episode_id, id = %id, "stale episode index entry, re-inserting");
            inner.by_episode.remove(&filter.episode_id);
        }
        inner.insert(Film::from_input(uuid::Uuid::new_v4().to_string(), input, now))
    }

    async fn create_film(&self, input: FilmInput) -> Result<Film, StorageError> {
        let film = Film::from_input(uuid::Uuid::new_v4().to_string(), input, Utc::now());
        self.inner.write().await.insert(film)
    }

    async fn get_film(&self, id: &str) -> Result<Option<Film>, StorageError> {
        Ok(self.inner.read().await.films.get(id).cloned())
    }

    async fn list_films(&self, limit: usize) -> Result<Vec<Film>, StorageError> {
        let inner = self.inner.read().await;
        let mut films: Vec<Film> = inner.films.values().cloned().collect();
        films.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        films.truncate(limit);
        Ok(films)
    }

    async fn update_film(&self, id: &str, patch: FilmPatch) -> Result<Film, StorageError> {
        let mut inner = self.inner.write().await;
        let film = inner
            .films
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound { entity: "film", id: id.to_owned() })?;
        film.apply_patch(patch, Utc::now());
        Ok(film.clone())
    }

    async fn delete_film(&self, id: &str) -> Result<bool, StorageError> {
        let mut inner = self.inner.write().await;
        let Some(film) = inner.films.remove(id) else {
            return Ok(false);
        };
        if let Some(episode_id) = film.episode_id {
            inner.by_episode.remove(&episode_id);
        }
        Ok(true)
    }

    async fn exists_by_title(
        &self,
        title: &str,
        excluding_id: Option<&str>,
    ) -> Result<bool, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner
            .films
            .values()
            .any(|f| f.title == title && excluding_id.is_none_or(|excluded| f.id != excluded)))
    }

    async fn count_films(&self) -> Result<u64, StorageError> {
        let len = self.inner.read().await.films.len();
        Ok(u64::try_from(len).unwrap_or(u64::MAX))
    }
}
