//! Storage layer for reelsync
//!
//! Keyed film records behind the [`FilmStore`] trait, with a PostgreSQL
//! backend for production and an in-memory backend for development and tests.

mod backend;
pub mod error;
mod memory;
mod pg_migrations;
mod pg_storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_storage::PgStorage;
pub use traits::FilmStore;
