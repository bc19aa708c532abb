//! PostgreSQL storage backend using sqlx.

mod films;

use chrono::{DateTime, Utc};
use reelsync_core::{
    Film, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

fn parse_string_list(row: &sqlx::postgres::PgRow, column: &str) -> Result<Vec<String>, StorageError> {
    let value: serde_json::Value = row.try_get(column)?;
    serde_json::from_value(value).map_err(|e| StorageError::DataCorruption {
        context: format!("films.{column} is not a string array"),
        source: Box::new(e),
    })
}

pub(crate) fn row_to_film(row: &sqlx::postgres::PgRow) -> Result<Film, StorageError> {
    let release_date: Option<DateTime<Utc>> = row.try_get("release_date")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    Ok(Film {
        id: row.try_get("id")?,
        episode_id: row.try_get("episode_id")?,
        title: row.try_get("title")?,
        opening_crawl: row.try_get("opening_crawl")?,
        director: row.try_get("director")?,
        producer: row.try_get("producer")?,
        release_date,
        species: parse_string_list(row, "species")?,
        starships: parse_string_list(row, "starships")?,
        vehicles: parse_string_list(row, "vehicles")?,
        characters: parse_string_list(row, "characters")?,
        planets: parse_string_list(row, "planets")?,
        url: row.try_get("url")?,
        is_external: row.try_get("is_external")?,
        created_at,
        updated_at,
    })
}

/// Convert `usize` to `i64` for SQL LIMIT binds.
/// Saturates to `i64::MAX` on overflow (only possible on 128-bit targets).
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

pub(crate) const FILM_COLUMNS: &str =
    "id, episode_id, title, opening_crawl, director, producer, release_date,
     species, starships, vehicles, characters, planets, url, is_external,
     created_at, updated_at";
