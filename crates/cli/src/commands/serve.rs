use anyhow::Result;
use reelsync_http::{AppState, create_router};
use reelsync_service::{FilmService, SyncConfig, start_sync_scheduler};
use std::sync::Arc;

use super::{build_reconciler, open_storage};

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let config = SyncConfig::from_env();
    let storage = open_storage().await?;
    let reconciler = build_reconciler(storage.clone(), &config)?;
    let film_service = Arc::new(FilmService::new(storage));

    let scheduler =
        start_sync_scheduler(Arc::clone(&reconciler), config.interval, config.run_on_startup);

    let state = Arc::new(AppState { film_service, reconciler });
    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for shutdown signal: {e}");
            }
        })
        .await;

    scheduler.abort();
    tracing::info!("Server stopped");
    served?;
    Ok(())
}
