//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use reelsync_core::{Film, FilmInput, FilmPatch, MergeFilter};

use crate::error::StorageError;
use crate::traits::FilmStore;

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <crate::PgStorage as $trait>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <crate::MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(crate::PgStorage),
    Memory(crate::MemoryStorage),
}

impl StorageBackend {
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::PgStorage::new(database_url).await?))
    }

    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(crate::MemoryStorage::new())
    }

    /// Short backend name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

// ── FilmStore ────────────────────────────────────────────────────

#[async_trait]
impl FilmStore for StorageBackend {
    async fn find_one_by_filter(&self, filter: &MergeFilter) -> Result<Option<Film>, StorageError> {
        dispatch!(self, FilmStore, find_one_by_filter(filter))
    }

    async fn upsert_by_filter(
        &self,
        filter: &MergeFilter,
        input: FilmInput,
    ) -> Result<Film, StorageError> {
        dispatch!(self, FilmStore, upsert_by_filter(filter, input))
    }

    async fn create_film(&self, input: FilmInput) -> Result<Film, StorageError> {
        dispatch!(self, FilmStore, create_film(input))
    }

    async fn get_film(&self, id: &str) -> Result<Option<Film>, StorageError> {
        dispatch!(self, FilmStore, get_film(id))
    }

    async fn list_films(&self, limit: usize) -> Result<Vec<Film>, StorageError> {
        dispatch!(self, FilmStore, list_films(limit))
    }

    async fn update_film(&self, id: &str, patch: FilmPatch) -> Result<Film, StorageError> {
        dispatch!(self, FilmStore, update_film(id, patch))
    }

    async fn delete_film(&self, id: &str) -> Result<bool, StorageError> {
        dispatch!(self, FilmStore, delete_film(id))
    }

    async fn exists_by_title(
        &self,
        title: &str,
        excluding_id: Option<&str>,
    ) -> Result<bool, StorageError> {
        dispatch!(self, FilmStore, exists_by_title(title, excluding_id))
    }

    async fn count_films(&self) -> Result<u64, StorageError> {
        dispatch!(self, FilmStore, count_films())
    }
}
