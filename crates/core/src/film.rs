//! Film catalog types.
//!
//! A [`Film`] is either authored locally (no `episode_id`, `is_external = false`)
//! or mirrored from the external feed (`episode_id` set, `is_external = true`).
//! The feed side arrives as [`FeedFilm`] and is validated into a
//! [`MergeFilter`] + [`FilmInput`] pair before it reaches storage.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MalformedRecord;

/// Stored catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    /// Store-assigned key, stable for the record's lifetime.
    pub id: String,
    /// External sequence number. `None` for locally-authored films.
    pub episode_id: Option<i64>,
    pub title: String,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: Option<DateTime<Utc>>,
    pub species: Vec<String>,
    pub starships: Vec<String>,
    pub vehicles: Vec<String>,
    pub characters: Vec<String>,
    pub planets: Vec<String>,
    pub url: Option<String>,
    /// Provenance flag: true when the record was created or last written by the feed.
    pub is_external: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Film {
    /// Materialize a new record from content fields.
    #[must_use]
    pub fn from_input(id: String, input: FilmInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            episode_id: input.episode_id,
            title: input.title,
            opening_crawl: input.opening_crawl,
            director: input.director,
            producer: input.producer,
            release_date: input.release_date,
            species: input.species,
            starships: input.starships,
            vehicles: input.vehicles,
            characters: input.characters,
            planets: input.planets,
            url: input.url,
            is_external: input.is_external,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every content field in place, keeping `id` and `created_at`.
    pub fn overwrite(&mut self, input: FilmInput, now: DateTime<Utc>) {
        self.episode_id = input.episode_id;
        self.title = input.title;
        self.opening_crawl = input.opening_crawl;
        self.director = input.director;
        self.producer = input.producer;
        self.release_date = input.release_date;
        self.species = input.species;
        self.starships = input.starships;
        self.vehicles = input.vehicles;
        self.characters = input.characters;
        self.planets = input.planets;
        self.url = input.url;
        self.is_external = input.is_external;
        self.updated_at = now;
    }

    /// Apply a partial user edit. Provenance and `episode_id` are not editable.
    pub fn apply_patch(&mut self, patch: FilmPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(opening_crawl) = patch.opening_crawl {
            self.opening_crawl = opening_crawl;
        }
        if let Some(director) = patch.director {
            self.director = director;
        }
        if let Some(producer) = patch.producer {
            self.producer = producer;
        }
        if let Some(release_date) = patch.release_date {
            self.release_date = Some(release_date);
        }
        if let Some(species) = patch.species {
            self.species = species;
        }
        if let Some(starships) = patch.starships {
            self.starships = starships;
        }
        if let Some(vehicles) = patch.vehicles {
            self.vehicles = vehicles;
        }
        if let Some(characters) = patch.characters {
            self.characters = characters;
        }
        if let Some(planets) = patch.planets {
            self.planets = planets;
        }
        if let Some(url) = patch.url {
            self.url = Some(url);
        }
        self.updated_at = now;
    }

    /// Content view of the record, without identity or timestamps.
    #[must_use]
    pub fn content(&self) -> FilmInput {
        FilmInput {
            episode_id: self.episode_id,
            title: self.title.clone(),
            opening_crawl: self.opening_crawl.clone(),
            director: self.director.clone(),
            producer: self.producer.clone(),
            release_date: self.release_date,
            species: self.species.clone(),
            starships: self.starships.clone(),
            vehicles: self.vehicles.clone(),
            characters: self.characters.clone(),
            planets: self.planets.clone(),
            url: self.url.clone(),
            is_external: self.is_external,
        }
    }
}

/// Content fields written by `create` and `upsert`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilmInput {
    pub episode_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub opening_crawl: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub producer: String,
    #[serde(default)]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub planets: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_external: bool,
}

/// Partial update of a film. `None` leaves the field unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmPatch {
    pub title: Option<String>,
    pub opening_crawl: Option<String>,
    pub director: Option<String>,
    pub producer: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub species: Option<Vec<String>>,
    pub starships: Option<Vec<String>>,
    pub vehicles: Option<Vec<String>>,
    pub characters: Option<Vec<String>>,
    pub planets: Option<Vec<String>>,
    pub url: Option<String>,
}

/// Match condition for merging a feed record into the store.
///
/// Always keyed by the external sequence number, so locally-authored films
/// (which have none) can never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeFilter {
    pub episode_id: i64,
}

impl MergeFilter {
    #[must_use]
    pub const fn episode(episode_id: i64) -> Self {
        Self { episode_id }
    }

    #[must_use]
    pub fn matches(&self, film: &Film) -> bool {
        film.episode_id == Some(self.episode_id)
    }
}

/// Film as published by the external feed.
///
/// `episode_id` and `title` are kept loose so that one bad entry is reported
/// as a malformed record instead of failing the whole snapshot decode. Build
/// feed records with [`FeedFilm::from_json`], which never fails.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedFilm {
    pub episode_id: Option<serde_json::Value>,
    pub title: Option<String>,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: Option<String>,
    pub species: Vec<String>,
    pub starships: Vec<String>,
    pub vehicles: Vec<String>,
    pub characters: Vec<String>,
    pub planets: Vec<String>,
    pub url: Option<String>,
    /// Decode error for an entry whose fields have the wrong shape.
    #[serde(skip)]
    pub rejected: Option<String>,
}

impl FeedFilm {
    /// Decode one feed entry. An entry with a null or mistyped field keeps
    /// its `episode_id` and `title` for reporting and is marked rejected.
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Self {
        match serde_json::from_value::<Self>(value.clone()) {
            Ok(film) => film,
            Err(e) => Self {
                episode_id: value.get("episode_id").cloned(),
                title: value.get("title").and_then(serde_json::Value::as_str).map(str::to_owned),
                rejected: Some(e.to_string()),
                ..Self::default()
            },
        }
    }

    /// Minimal well-formed feed record.
    #[must_use]
    pub fn new(episode_id: i64, title: impl Into<String>) -> Self {
        Self {
            episode_id: Some(serde_json::Value::from(episode_id)),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Episode id if it is a usable integer.
    #[must_use]
    pub fn episode_number(&self) -> Option<i64> {
        self.episode_id.as_ref().and_then(serde_json::Value::as_i64)
    }

    /// Validate into the merge filter and the content written by the upsert.
    /// The result is always marked as externally sourced.
    pub fn into_input(self) -> Result<(MergeFilter, FilmInput), MalformedRecord> {
        if let Some(reason) = self.rejected {
            return Err(MalformedRecord::InvalidField(reason));
        }
        let episode_id = match &self.episode_id {
            None | Some(serde_json::Value::Null) => return Err(MalformedRecord::MissingEpisodeId),
            Some(value) => {
                value.as_i64().ok_or_else(|| MalformedRecord::InvalidEpisodeId(value.to_string()))?
            },
        };
        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(MalformedRecord::MissingTitle),
        };
        let release_date = match self.release_date.as_deref() {
            None => None,
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(
                parse_release_date(raw)
                    .ok_or_else(|| MalformedRecord::InvalidReleaseDate(raw.to_owned()))?,
            ),
        };
        let url = self.url.filter(|u| !u.trim().is_empty());

        let input = FilmInput {
            episode_id: Some(episode_id),
            title,
            opening_crawl: self.opening_crawl,
            director: self.director,
            producer: self.producer,
            release_date,
            species: self.species,
            starships: self.starships,
            vehicles: self.vehicles,
            characters: self.characters,
            planets: self.planets,
            url,
            is_external: true,
        };
        Ok((MergeFilter::episode(episode_id), input))
    }
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or RFC 3339.
#[must_use]
pub fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc))
}
