use std::time::Duration;

use reelsync_core::{
    DEFAULT_FEED_TIMEOUT_SECS, DEFAULT_FEED_URL, DEFAULT_SYNC_INTERVAL_SECS,
    DEFAULT_WRITE_TIMEOUT_SECS, env_flag_with_default, env_parse_with_default,
};

/// Reconciliation settings, read from `REELSYNC_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub feed_url: String,
    pub interval: Duration,
    pub feed_timeout: Duration,
    pub write_timeout: Duration,
    pub run_on_startup: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_owned(),
            interval: Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS),
            feed_timeout: Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS),
            write_timeout: Duration::from_secs(DEFAULT_WRITE_TIMEOUT_SECS),
            run_on_startup: true,
        }
    }
}

impl SyncConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let feed_url = std::env::var("REELSYNC_FEED_URL")
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_FEED_URL.to_owned());
        Self {
            feed_url,
            interval: secs_at_least_one("REELSYNC_SYNC_INTERVAL_SECS", DEFAULT_SYNC_INTERVAL_SECS),
            feed_timeout: secs_at_least_one("REELSYNC_FEED_TIMEOUT_SECS", DEFAULT_FEED_TIMEOUT_SECS),
            write_timeout: secs_at_least_one(
                "REELSYNC_WRITE_TIMEOUT_SECS",
                DEFAULT_WRITE_TIMEOUT_SECS,
            ),
            run_on_startup: env_flag_with_default("REELSYNC_SYNC_ON_STARTUP", true),
        }
    }
}

// tokio::time::interval panics on a zero period.
fn secs_at_least_one(var: &str, default: u64) -> Duration {
    let raw = env_parse_with_default(var, default);
    if raw == 0 {
        tracing::warn!(var, "zero duration is not allowed, using 1 second");
        return Duration::from_secs(1);
    }
    Duration::from_secs(raw)
}
