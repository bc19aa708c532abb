//! FilmStore implementation for PgStorage.

use async_trait::async_trait;
use chrono::Utc;
use reelsync_core::{Film, FilmInput, FilmPatch, MergeFilter};

use super::{FILM_COLUMNS, PgStorage, row_to_film, usize_to_i64};
use crate::error::StorageError;
use crate::traits::FilmStore;

/// Binds the 16 film columns in `FILM_COLUMNS` order.
fn bind_film<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    film: &'q Film,
) -> Result<sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>, StorageError> {
    Ok(query
        .bind(&film.id)
        .bind(film.episode_id)
        .bind(&film.title)
        .bind(&film.opening_crawl)
        .bind(&film.director)
        .bind(&film.producer)
        .bind(film.release_date)
        .bind(serde_json::to_value(&film.species)?)
        .bind(serde_json::to_value(&film.starships)?)
        .bind(serde_json::to_value(&film.vehicles)?)
        .bind(serde_json::to_value(&film.characters)?)
        .bind(serde_json::to_value(&film.planets)?)
        .bind(&film.url)
        .bind(film.is_external)
        .bind(film.created_at)
        .bind(film.updated_at))
}

#[async_trait]
impl FilmStore for PgStorage {
    async fn find_one_by_filter(&self, filter: &MergeFilter) -> Result<Option<Film>, StorageError> {
        let row = sqlx::query(&format!("SELECT {FILM_COLUMNS} FROM films WHERE episode_id = $1"))
            .bind(filter.episode_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_film(&r)).transpose()
    }

    async fn upsert_by_filter(
        &self,
        filter: &MergeFilter,
        mut input: FilmInput,
    ) -> Result<Film, StorageError> {
        input.episode_id = Some(filter.episode_id);
        input.is_external = true;
        let candidate = Film::from_input(uuid::Uuid::new_v4().to_string(), input, Utc::now());

        // ON CONFLICT keeps the existing id and created_at.
        let sql = format!(
            "INSERT INTO films ({FILM_COLUMNS})
             VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)
             ON CONFLICT (episode_id) DO UPDATE SET
                 title = EXCLUDED.title,
                 opening_crawl = EXCLUDED.opening_crawl,
                 director = EXCLUDED.director,
                 producer = EXCLUDED.producer,
                 release_date = EXCLUDED.release_date,
                 species = EXCLUDED.species,
                 starships = EXCLUDED.starships,
                 vehicles = EXCLUDED.vehicles,
                 characters = EXCLUDED.characters,
                 planets = EXCLUDED.planets,
                 url = EXCLUDED.url,
                 is_external = EXCLUDED.is_external,
                 updated_at = EXCLUDED.updated_at
             RETURNING {FILM_COLUMNS}"
        );
        let row = bind_film(sqlx::query(&sql), &candidate)?.fetch_one(&self.pool).await?;
        row_to_film(&row)
    }

    async fn create_film(&self, input: FilmInput) -> Result<Film, StorageError> {
        let film = Film::from_input(uuid::Uuid::new_v4().to_string(), input, Utc::now());
        let sql = format!(
            "INSERT INTO films ({FILM_COLUMNS})
             VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)"
        );
        bind_film(sqlx::query(&sql), &film)?.execute(&self.pool).await?;
        Ok(film)
    }

    async fn get_film(&self, id: &str) -> Result<Option<Film>, StorageError> {
        let row = sqlx::query(&format!("SELECT {FILM_COLUMNS} FROM films WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_film(&r)).transpose()
    }

    async fn list_films(&self, limit: usize) -> Result<Vec<Film>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {FILM_COLUMNS} FROM films ORDER BY created_at ASC, id ASC LIMIT $1"
        ))
        .bind(usize_to_i64(limit))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_film).collect()
    }

    async fn update_film(&self, id: &str, patch: FilmPatch) -> Result<Film, StorageError> {
        let mut tx = self.pool.begin().await?;
        let row =
            sqlx::query(&format!("SELECT {FILM_COLUMNS} FROM films WHERE id = $1 FOR UPDATE"))
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(row) = row else {
            return Err(StorageError::NotFound { entity: "film", id: id.to_owned() });
        };
        let mut film = row_to_film(&row)?;
        film.apply_patch(patch, Utc::now());

        sqlx::query(
            "UPDATE films
             SET title = $2, opening_crawl = $3, director = $4, producer = $5,
                 release_date = $6, species = $7, starships = $8, vehicles = $9,
                 characters = $10, planets = $11, url = $12, updated_at = $13
             WHERE id = $1",
        )
        .bind(&film.id)
        .bind(&film.title)
        .bind(&film.opening_crawl)
        .bind(&film.director)
        .bind(&film.producer)
        .bind(film.release_date)
        .bind(serde_json::to_value(&film.species)?)
        .bind(serde_json::to_value(&film.starships)?)
        .bind(serde_json::to_value(&film.vehicles)?)
        .bind(serde_json::to_value(&film.characters)?)
        .bind(serde_json::to_value(&film.planets)?)
        .bind(&film.url)
        .bind(film.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(film)
    }

    async fn delete_film(&self, id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM films WHERE id = $1").bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_title(
        &self,
        title: &str,
        excluding_id: Option<&str>,
    ) -> Result<bool, StorageError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                 SELECT 1 FROM films
                 WHERE title = $1 AND ($2::TEXT IS NULL OR id <> $2)
             )",
        )
        .bind(title)
        .bind(excluding_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn count_films(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM films").fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
