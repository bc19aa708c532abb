//! Shared constants for reelsync.

/// Maximum number of films returned by any list query (DoS protection).
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Default number of films when limit is not specified by the caller.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Canonical film list endpoint.
pub const DEFAULT_FEED_URL: &str = "https://swapi.dev/api/films";

/// One reconciliation per day.
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 86_400;

/// Upper bound for the whole snapshot fetch, all pages included.
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 30;

/// Upper bound for a single record upsert.
pub const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 10;

/// Pages followed through `next` links before the fetch is declared invalid.
/// Guards against a feed whose `next` links form a cycle.
pub const MAX_FEED_PAGES: usize = 50;
