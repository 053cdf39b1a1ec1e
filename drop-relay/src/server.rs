//! Main ShareRelay server coordination.
//!
//! ShareRelay owns the session registry, the file store, rate limiters, and
//! operational metrics. One instance is constructed at process start and
//! shared behind an `Arc`; tests build their own independent instances.

use crate::config::Config;
use crate::limits::RateLimits;
use crate::registry::SessionRegistry;
use crate::store::FileStore;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

/// Operational metrics for monitoring relay activity.
///
/// All counters are monotonically increasing (reset only on restart).
/// Thread-safe via `AtomicU64` — no locks needed for incrementing.
#[derive(Debug, Default)]
pub struct RelayMetrics {
    /// Total sessions created (minted, claimed, and implicit).
    pub sessions_created: AtomicU64,
    /// Total file uploads accepted.
    pub uploads_total: AtomicU64,
    /// Total file downloads served.
    pub fetches_total: AtomicU64,
    /// Total session describe (poll) requests served.
    pub describes_total: AtomicU64,
    /// Total payload bytes accepted from uploads.
    pub bytes_received: AtomicU64,
    /// Total payload bytes served to downloads.
    pub bytes_sent: AtomicU64,
    /// Total rate limit rejections (upload + global).
    pub rate_limit_hits: AtomicU64,
    /// Total requests rejected with a client or server error.
    pub errors_total: AtomicU64,
}

/// The relay server aggregate.
pub struct ShareRelay {
    config: Config,
    registry: Arc<SessionRegistry>,
    store: FileStore,
    /// Rate limiters for uploads and aggregate throughput.
    rate_limits: RateLimits,
    /// Operational metrics (counters).
    metrics: RelayMetrics,
}

impl std::fmt::Debug for ShareRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareRelay")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("rate_limits", &self.rate_limits)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl ShareRelay {
    /// Create a new ShareRelay from configuration.
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(SessionRegistry::new(&config.codes));
        let store = FileStore::new(Arc::clone(&registry), &config.store);
        let rate_limits = RateLimits::new(&config.limits);
        Self {
            config,
            registry,
            store,
            rate_limits,
            metrics: RelayMetrics::default(),
        }
    }

    /// Get the relay configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get access to the session registry.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Get a clone of the registry Arc for background tasks.
    pub fn registry_arc(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.registry)
    }

    /// Get access to the file store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Get access to the rate limiters.
    pub fn rate_limits(&self) -> &RateLimits {
        &self.rate_limits
    }

    /// Get access to the operational metrics.
    pub fn metrics(&self) -> &RelayMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drop_types::SessionCode;
    use std::sync::atomic::Ordering;

    #[test]
    fn relay_wires_store_and_registry_together() {
        let relay = ShareRelay::new(Config::default());

        let code = relay.registry().create(None).unwrap();
        assert_eq!(relay.registry().session_count(), 1);

        // The store sees the session the registry created.
        let info = relay.store().list(&code).unwrap();
        assert_eq!(info.file_count, 0);
    }

    #[test]
    fn independent_relays_do_not_share_sessions() {
        let relay_a = ShareRelay::new(Config::default());
        let relay_b = ShareRelay::new(Config::default());

        relay_a
            .registry()
            .create(Some(SessionCode::new("4444")))
            .unwrap();

        assert_eq!(relay_a.registry().session_count(), 1);
        assert_eq!(relay_b.registry().session_count(), 0);
        assert!(relay_b.store().list(&SessionCode::new("4444")).is_err());
    }

    #[test]
    fn metrics_start_at_zero() {
        let relay = ShareRelay::new(Config::default());
        assert_eq!(relay.metrics().uploads_total.load(Ordering::Relaxed), 0);
        assert_eq!(relay.metrics().bytes_received.load(Ordering::Relaxed), 0);
    }
}
