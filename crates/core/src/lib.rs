//! Core types and constants for reelsync
//!
//! This crate contains domain types shared across all other crates.

mod constants;
mod env_config;
mod error;
mod film;

pub use constants::*;
pub use env_config::{env_flag_with_default, env_parse_with_default};
pub use error::MalformedRecord;
pub use film::*;
