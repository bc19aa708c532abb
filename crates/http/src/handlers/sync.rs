use axum::{Json, extract::State};
use std::sync::Arc;

use reelsync_service::ReconciliationRun;

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::SyncStatusResponse;

/// Runs reconciliation now. Waits behind a scheduled run already in progress.
pub async fn trigger_sync(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReconciliationRun>, ApiError> {
    tracing::info!("Manual sync requested");
    let run = state.reconciler.reconcile().await?;
    Ok(Json(run))
}

pub async fn sync_status(State(state): State<Arc<AppState>>) -> Json<SyncStatusResponse> {
    Json(SyncStatusResponse {
        running: state.reconciler.is_running(),
        last_run: state.reconciler.last_run().await,
    })
}
