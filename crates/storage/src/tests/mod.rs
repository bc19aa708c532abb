//! Test utilities and module declarations for storage tests.

use reelsync_core::{FeedFilm, FilmInput, MergeFilter};

use crate::MemoryStorage;

pub fn create_test_storage() -> MemoryStorage {
    MemoryStorage::new()
}

pub fn external_input(episode_id: i64, title: &str) -> (MergeFilter, FilmInput) {
    FeedFilm::new(episode_id, title).into_input().unwrap()
}

pub fn local_input(title: &str) -> FilmInput {
    FilmInput {
        title: title.to_owned(),
        opening_crawl: "A fan-made story".to_owned(),
        director: "Someone".to_owned(),
        producer: "Someone else".to_owned(),
        ..FilmInput::default()
    }
}
