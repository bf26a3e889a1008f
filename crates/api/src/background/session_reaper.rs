//! Periodic eviction of expired sessions.
//!
//! `authenticate` already evicts expired entries it touches; this task
//! bounds store growth for sessions that are never touched again. Runs on a
//! fixed interval using `tokio::time::interval` until `cancel` is triggered.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::auth::session::SessionStore;

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the session reaper loop until cancelled.
pub async fn run(sessions: SessionStore, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Session reaper started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    // The first tick fires immediately; skip it so startup stays quiet.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session reaper stopping");
                break;
            }
            _ = interval.tick() => {
                let evicted = sessions.purge_expired().await;
                if evicted > 0 {
                    tracing::info!(evicted, "Session reaper: purged expired sessions");
                } else {
                    tracing::debug!("Session reaper: nothing to purge");
                }
            }
        }
    }
}
