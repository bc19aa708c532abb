use std::sync::Arc;

use reelsync_core::{Film, FilmInput, FilmPatch, MAX_QUERY_LIMIT};
use reelsync_storage::{FilmStore, StorageError};

use crate::ServiceError;

/// User-facing catalog operations.
///
/// Films created here are always local: no episode number and
/// `is_external = false`, so reconciliation never touches them.
pub struct FilmService {
    storage: Arc<dyn FilmStore>,
}

impl FilmService {
    #[must_use]
    pub fn new(storage: Arc<dyn FilmStore>) -> Self {
        Self { storage }
    }

    pub async fn list_films(&self, limit: usize) -> Result<Vec<Film>, ServiceError> {
        Ok(self.storage.list_films(limit.clamp(1, MAX_QUERY_LIMIT)).await?)
    }

    pub async fn get_film(&self, id: &str) -> Result<Film, ServiceError> {
        self.storage.get_film(id).await?.ok_or_else(|| ServiceError::NotFound(id.to_owned()))
    }

    pub async fn create_film(&self, mut input: FilmInput) -> Result<Film, ServiceError> {
        validate_input(&input)?;
        input.episode_id = None;
        input.is_external = false;
        if self.storage.exists_by_title(&input.title, None).await? {
            return Err(ServiceError::DuplicateTitle(input.title));
        }
        let film = self.storage.create_film(input).await?;
        tracing::info!(id = %film.id, title = %film.title, "Film created");
        Ok(film)
    }

    pub async fn update_film(&self, id: &str, patch: FilmPatch) -> Result<Film, ServiceError> {
        validate_patch(&patch)?;
        if let Some(title) = patch.title.as_deref() {
            if self.storage.exists_by_title(title, Some(id)).await? {
                return Err(ServiceError::DuplicateTitle(title.to_owned()));
            }
        }
        match self.storage.update_film(id, patch).await {
            Ok(film) => Ok(film),
            Err(StorageError::NotFound { .. }) => Err(ServiceError::NotFound(id.to_owned())),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete_film(&self, id: &str) -> Result<(), ServiceError> {
        if self.storage.delete_film(id).await? {
            tracing::info!(id, "Film deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound(id.to_owned()))
        }
    }

    pub async fn count_films(&self) -> Result<u64, ServiceError> {
        Ok(self.storage.count_films().await?)
    }
}

fn validate_input(input: &FilmInput) -> Result<(), ServiceError> {
    require_text("title", &input.title)?;
    require_text("opening_crawl", &input.opening_crawl)?;
    require_text("director", &input.director)?;
    require_text("producer", &input.producer)?;
    if let Some(url) = input.url.as_deref() {
        validate_url(url)?;
    }
    Ok(())
}

fn validate_patch(patch: &FilmPatch) -> Result<(), ServiceError> {
    let fields = [
        ("title", &patch.title),
        ("opening_crawl", &patch.opening_crawl),
        ("director", &patch.director),
        ("producer", &patch.producer),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            require_text(field, value)?;
        }
    }
    if let Some(url) = patch.url.as_deref() {
        validate_url(url)?;
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

fn validate_url(raw: &str) -> Result<(), ServiceError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ServiceError::InvalidInput(format!("url {raw:?} is invalid: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ServiceError::InvalidInput(format!("url {raw:?} must be http or https")));
    }
    Ok(())
}
