//! Service layer for reelsync
//!
//! Centralizes business logic between HTTP/CLI entry points and storage/feed.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod config;
mod error;
mod film_service;
mod reconciler;
mod run;
mod scheduler;
#[cfg(test)]
mod tests;

pub use config::SyncConfig;
pub use error::ServiceError;
pub use film_service::FilmService;
pub use reconciler::Reconciler;
pub use run::{ReconciliationRun, RecordError, RecordErrorKind, RunOutcome};
pub use scheduler::start_sync_scheduler;
