use anyhow::Result;
use reelsync_service::SyncConfig;

use super::{build_reconciler, open_storage};

/// One reconciliation pass. The report goes to stdout, logs to stderr.
pub(crate) async fn run() -> Result<()> {
    let config = SyncConfig::from_env();
    let storage = open_storage().await?;
    let reconciler = build_reconciler(storage, &config)?;

    let run = reconciler.reconcile().await?;
    println!("{}", serde_json::to_string_pretty(&run)?);
    Ok(())
}
