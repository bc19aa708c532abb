pub(crate) mod serve;
pub(crate) mod sync;

use std::sync::Arc;

use anyhow::{Context, Result};
use reelsync_feed::FeedClient;
use reelsync_service::{Reconciler, SyncConfig};
use reelsync_storage::StorageBackend;

/// Storage from `DATABASE_URL`, or an in-memory catalog when it is unset.
pub(crate) async fn open_storage() -> Result<Arc<StorageBackend>> {
    let backend = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => StorageBackend::new_postgres(&url)
            .await
            .context("failed to connect to PostgreSQL")?,
        _ => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on exit)");
            StorageBackend::new_memory()
        },
    };
    tracing::info!(backend = backend.kind(), "Storage ready");
    Ok(Arc::new(backend))
}

pub(crate) fn build_reconciler(
    storage: Arc<StorageBackend>,
    config: &SyncConfig,
) -> Result<Arc<Reconciler>> {
    let feed = FeedClient::new(&config.feed_url, config.feed_timeout)
        .context("invalid REELSYNC_FEED_URL")?;
    Ok(Arc::new(Reconciler::new(storage, Arc::new(feed), config)))
}
