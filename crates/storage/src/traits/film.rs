use async_trait::async_trait;
use reelsync_core::{Film, FilmInput, FilmPatch, MergeFilter};

use crate::error::StorageError;

/// Film catalog operations.
#[async_trait]
pub trait FilmStore: Send + Sync {
    /// Find the single film matching the merge filter.
    async fn find_one_by_filter(&self, filter: &MergeFilter) -> Result<Option<Film>, StorageError>;

    /// Overwrite the matching film's content in place, or insert a new film when
    /// nothing matches. Returns the stored record.
    ///
    /// Atomic with respect to the filter: repeated calls with the same filter
    /// never produce two records. The filter's `episode_id` wins over the one in
    /// `input`, and the stored film is always marked external.
    async fn upsert_by_filter(
        &self,
        filter: &MergeFilter,
        input: FilmInput,
    ) -> Result<Film, StorageError>;

    /// Insert a new film with a fresh id.
    async fn create_film(&self, input: FilmInput) -> Result<Film, StorageError>;

    /// Get film by ID.
    async fn get_film(&self, id: &str) -> Result<Option<Film>, StorageError>;

    /// List films, oldest first.
    async fn list_films(&self, limit: usize) -> Result<Vec<Film>, StorageError>;

    /// Apply a partial update. `NotFound` when the id does not exist.
    async fn update_film(&self, id: &str, patch: FilmPatch) -> Result<Film, StorageError>;

    /// Delete film by ID. Returns `true` if deleted.
    async fn delete_film(&self, id: &str) -> Result<bool, StorageError>;

    /// Whether another film already uses this exact title.
    async fn exists_by_title(
        &self,
        title: &str,
        excluding_id: Option<&str>,
    ) -> Result<bool, StorageError>;

    /// Total number of stored films.
    async fn count_films(&self) -> Result<u64, StorageError>;
}
