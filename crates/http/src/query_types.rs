//! Request/query types (Deserialize)

use reelsync_core::{DEFAULT_QUERY_LIMIT, MAX_QUERY_LIMIT};
use serde::Deserialize;

const fn default_limit() -> usize {
    DEFAULT_QUERY_LIMIT
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl ListQuery {
    /// Cap limit to prevent unbounded queries.
    pub fn capped_limit(&self) -> usize {
        self.limit.min(MAX_QUERY_LIMIT)
    }
}
