use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use reelsync_core::{Film, FilmInput, FilmPatch};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::ListQuery;

pub async fn list_films(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Film>>, ApiError> {
    let films = state.film_service.list_films(query.capped_limit()).await?;
    Ok(Json(films))
}

pub async fn get_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Film>, ApiError> {
    Ok(Json(state.film_service.get_film(&id).await?))
}

pub async fn create_film(
    State(state): State<Arc<AppState>>,
    Json(input): Json<FilmInput>,
) -> Result<(StatusCode, Json<Film>), ApiError> {
    let film = state.film_service.create_film(input).await?;
    Ok((StatusCode::CREATED, Json(film)))
}

pub async fn update_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<FilmPatch>,
) -> Result<Json<Film>, ApiError> {
    tracing::debug!(id = %id, "Updating film");
    Ok(Json(state.film_service.update_film(&id, patch).await?))
}

pub async fn delete_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.film_service.delete_film(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
