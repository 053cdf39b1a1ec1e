//! Rate limiting for drop-relay.
//!
//! Provides protection against upload spam and aggregate overload.
//!
//! ## Design Notes
//!
//! Clients identify themselves only by the opaque `clientId` they send with
//! uploads, so upload quotas are keyed by that string. A spoofing client can
//! rotate ids, which is why the global limiter exists: it caps aggregate
//! request throughput regardless of how clients identify themselves.
//!
//! Both use the governor crate's rate limiters backed by DashMap.

use crate::config::LimitsConfig;
use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Type alias for a keyed rate limiter using DashMap.
type KeyedLimiter<K> = RateLimiter<
    K,
    dashmap::DashMap<K, InMemoryState>,
    DefaultClock,
    NoOpMiddleware<governor::clock::QuantaInstant>,
>;

/// Type alias for a direct (non-keyed) rate limiter.
type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiters for the relay server.
#[derive(Clone)]
pub struct RateLimits {
    /// Limits uploads per client id.
    ///
    /// Configured via `limits.uploads_per_minute`.
    upload_limiter: Arc<KeyedLimiter<String>>,

    /// Global rate limiter across all clients.
    ///
    /// Prevents aggregate overload even if individual clients are within
    /// their quotas.
    global_limiter: Arc<DirectLimiter>,
}

impl std::fmt::Debug for RateLimits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimits")
            .field("upload_limiter", &"KeyedLimiter<String>")
            .field("global_limiter", &"DirectLimiter")
            .finish()
    }
}

impl RateLimits {
    /// Create rate limiters from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configured values are zero.
    pub fn new(config: &LimitsConfig) -> Self {
        let uploads_per_minute = NonZeroU32::new(config.uploads_per_minute)
            .expect("uploads_per_minute must be > 0");
        let upload_quota = Quota::per_minute(uploads_per_minute);

        let global_rps = NonZeroU32::new(config.global_requests_per_second)
            .expect("global_requests_per_second must be > 0");
        let global_quota = Quota::per_second(global_rps);

        Self {
            upload_limiter: Arc::new(RateLimiter::keyed(upload_quota)),
            global_limiter: Arc::new(RateLimiter::direct(global_quota)),
        }
    }

    /// Check if an upload from this client is allowed.
    ///
    /// # Returns
    ///
    /// `Ok(())` if allowed, `Err` with reason if rate limited.
    pub fn check_upload(&self, client_id: &str) -> Result<(), RateLimitError> {
        self.upload_limiter
            .check_key(&client_id.to_string())
            .map_err(|_| RateLimitError::UploadLimitExceeded)
    }

    /// Check if the global request rate is within limits.
    pub fn check_global(&self) -> Result<(), RateLimitError> {
        self.global_limiter
            .check()
            .map_err(|_| RateLimitError::GlobalLimitExceeded)
    }

    /// Get the number of tracked client keys (for metrics).
    pub fn upload_keys_count(&self) -> usize {
        self.upload_limiter.len()
    }

    /// Evict stale entries from the keyed rate limiter DashMap.
    ///
    /// Over time, departed clients leave entries behind. `retain_recent()`
    /// removes entries whose rate limit cells have fully recharged (idle
    /// clients). Called periodically from the sweep task.
    pub fn shrink(&self) {
        self.upload_limiter.retain_recent();
    }
}

/// Rate limit error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    /// Too many uploads from this client.
    UploadLimitExceeded,
    /// Global request rate exceeded across all clients.
    GlobalLimitExceeded,
}

impl std::fmt::Display for RateLimitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UploadLimitExceeded => {
                write!(f, "upload rate limit exceeded")
            }
            Self::GlobalLimitExceeded => {
                write!(f, "global rate limit exceeded")
            }
        }
    }
}

impl std::error::Error for RateLimitError {}
