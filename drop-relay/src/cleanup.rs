//! Background sweep task for inactive sessions.
//!
//! Runs periodically to delete sessions whose last activity is older than
//! the TTL. Reads never trigger the sweep; this task is the only path that
//! removes sessions.

use crate::config::CleanupConfig;
use crate::limits::RateLimits;
use crate::registry::SessionRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

/// Spawn the background sweep task.
///
/// Returns a handle that can be used to abort the task.
pub fn spawn_sweep_task(
    registry: Arc<SessionRegistry>,
    rate_limits: RateLimits,
    config: CleanupConfig,
    session_ttl: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if !config.enabled {
            tracing::info!("Sweep task disabled");
            return;
        }

        let interval_secs = config.interval_secs;
        tracing::info!(
            "Sweep task started (interval: {}s, ttl: {}s)",
            interval_secs,
            session_ttl.as_secs()
        );

        let mut timer = interval(Duration::from_secs(interval_secs));

        loop {
            timer.tick().await;

            let removed = registry.sweep_expired(session_ttl);
            if removed > 0 {
                tracing::info!("Sweep: removed {} expired sessions", removed);
            } else {
                tracing::debug!("Sweep: no expired sessions");
            }

            // Idle rate-limiter keys recharge over the same timescale.
            rate_limits.shrink();
        }
    })
}
