//! Response types (Serialize)

use reelsync_service::RunOutcome;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SyncStatusResponse {
    pub running: bool,
    pub last_run: Option<RunOutcome>,
}
