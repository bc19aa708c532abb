//! Storage backend trait abstraction

pub mod film;

pub use film::FilmStore;
