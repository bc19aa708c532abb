use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::Reconciler;

/// Spawns background task that runs reconciliation every `interval`.
///
/// With `run_on_startup` the first pass starts immediately, otherwise one
/// interval after spawn. Errors are logged but do not stop the loop; a failed
/// run is retried on the next tick. A tick that fires during a manual run
/// waits for it to finish.
pub fn start_sync_scheduler(
    reconciler: Arc<Reconciler>,
    interval: Duration,
    run_on_startup: bool,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        if !run_on_startup {
            // First tick of an interval completes immediately.
            ticker.tick().await;
        }
        tracing::info!(interval_secs = interval.as_secs(), run_on_startup, "Sync scheduler started");
        loop {
            ticker.tick().await;
            let reconciler = Arc::clone(&reconciler);
            let result = tokio::spawn(async move { reconciler.reconcile().await }).await;
            match result {
                Ok(Ok(run)) if run.error_count() > 0 => {
                    tracing::warn!(errors = run.error_count(), "Scheduled sync finished with record errors");
                },
                Ok(Ok(_)) => {},
                Ok(Err(e)) => {
                    tracing::warn!("Scheduled sync failed, retrying next interval: {e}");
                },
                Err(e) => {
                    tracing::warn!("Scheduled sync panic: {e:?}");
                },
            }
        }
    })
}
