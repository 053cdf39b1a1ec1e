//! The session registry: one process-wide table mapping codes to sessions.
//!
//! Every session lives behind `Arc<RwLock<SessionRecord>>` inside a
//! [`DashMap`]. Registry mutations (create, sweep removal) and session
//! mutations (append file, refresh activity) serialize on those two lock
//! layers: the map's shard lock guards membership, the record lock guards
//! contents. The sweep decides staleness while holding both, so it cannot
//! remove a session out from under an in-flight upload.

use crate::codegen::CodeGenerator;
use crate::config::CodesConfig;
use crate::error::{ShareError, ShareResult};
use crate::store::FileRecord;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use drop_types::{CodePolicy, SessionCode};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// One code-addressed session and the files uploaded under it.
#[derive(Debug)]
pub struct SessionRecord {
    /// The session's code.
    pub code: SessionCode,
    /// Uploaded files, insertion order = upload order. Never reordered.
    pub files: Vec<FileRecord>,
    /// Unix milliseconds of the last read or write touching this session.
    pub last_activity: u64,
}

impl SessionRecord {
    fn new(code: SessionCode, now_ms: u64) -> Self {
        Self {
            code,
            files: Vec::new(),
            last_activity: now_ms,
        }
    }

    /// Refresh the activity timestamp.
    pub fn touch(&mut self, now_ms: u64) {
        self.last_activity = now_ms;
    }
}

/// A shared handle to one session.
pub type SharedSession = Arc<RwLock<SessionRecord>>;

/// The process-wide session table.
///
/// Constructed at startup and handed around behind an `Arc`; tests build
/// independent registries, there is no ambient singleton.
pub struct SessionRegistry {
    sessions: DashMap<SessionCode, SharedSession>,
    generator: CodeGenerator,
    custom_policy: CodePolicy,
    max_generate_attempts: u32,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.sessions.len())
            .field("generator", &self.generator)
            .finish_non_exhaustive()
    }
}

impl SessionRegistry {
    /// Create an empty registry with the given code policies.
    pub fn new(codes: &CodesConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            generator: CodeGenerator::new(codes.auto),
            custom_policy: codes.custom,
            max_generate_attempts: codes.max_generate_attempts,
        }
    }

    /// Create a session.
    ///
    /// With `Some(code)` the code must satisfy the custom policy and be free;
    /// with `None` a code is minted under the auto policy, retrying on
    /// collision up to the configured attempt bound.
    ///
    /// # Errors
    ///
    /// [`ShareError::BadFormat`], [`ShareError::CodeInUse`], or
    /// [`ShareError::ExhaustedRetries`].
    pub fn create(&self, code: Option<SessionCode>) -> ShareResult<SessionCode> {
        match code {
            Some(code) => self.claim(code),
            None => self.mint(),
        }
    }

    /// Register a caller-chosen code.
    fn claim(&self, code: SessionCode) -> ShareResult<SessionCode> {
        if !self.custom_policy.matches(&code) {
            return Err(ShareError::BadFormat {
                expected: self.custom_policy.describe(),
            });
        }

        match self.sessions.entry(code.clone()) {
            Entry::Occupied(_) => Err(ShareError::CodeInUse { code }),
            Entry::Vacant(entry) => {
                let now = current_millis();
                entry.insert(Arc::new(RwLock::new(SessionRecord::new(code.clone(), now))));
                tracing::info!("Created session {} (explicit code)", code);
                Ok(code)
            }
        }
    }

    /// Mint a fresh code, retrying on collision.
    fn mint(&self) -> ShareResult<SessionCode> {
        for _ in 0..self.max_generate_attempts {
            let candidate = self.generator.generate();
            match self.sessions.entry(candidate.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(entry) => {
                    let now = current_millis();
                    entry.insert(Arc::new(RwLock::new(SessionRecord::new(
                        candidate.clone(),
                        now,
                    ))));
                    tracing::info!("Created session {} (minted code)", candidate);
                    return Ok(candidate);
                }
            }
        }

        tracing::warn!(
            "Code space saturated: no free code in {} attempts",
            self.max_generate_attempts
        );
        Err(ShareError::ExhaustedRetries {
            attempts: self.max_generate_attempts,
        })
    }

    /// Look up a session by code.
    ///
    /// The caller is expected to refresh `last_activity` on the record for
    /// any read or write it performs.
    ///
    /// # Errors
    ///
    /// [`ShareError::SessionNotFound`] if the code is unknown.
    pub fn get(&self, code: &SessionCode) -> ShareResult<SharedSession> {
        self.sessions
            .get(code)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ShareError::SessionNotFound { code: code.clone() })
    }

    /// Look up a session, creating it if the code is unknown.
    ///
    /// The upload path uses this so a sender-side code typo still produces a
    /// working session. No policy validation happens here on purpose.
    pub fn get_or_create(&self, code: &SessionCode) -> SharedSession {
        let entry = self.sessions.entry(code.clone()).or_insert_with(|| {
            tracing::info!("Created session {} (implicit, via upload)", code);
            Arc::new(RwLock::new(SessionRecord::new(
                code.clone(),
                current_millis(),
            )))
        });
        Arc::clone(entry.value())
    }

    /// Remove every session whose `last_activity` is older than `ttl`.
    ///
    /// Returns the number of sessions removed.
    pub fn sweep_expired(&self, ttl: Duration) -> usize {
        let cutoff = current_millis().saturating_sub(ttl.as_millis() as u64);
        self.sweep_older_than(cutoff)
    }

    /// Remove every session whose `last_activity` is strictly before
    /// `cutoff_ms`.
    ///
    /// Staleness is decided under the record lock while `retain` holds the
    /// map shard, so a concurrent append either finishes first (and its
    /// activity refresh is seen) or starts after the session is gone.
    pub fn sweep_older_than(&self, cutoff_ms: u64) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|code, record| {
            let keep = record.read().last_activity >= cutoff_ms;
            if !keep {
                tracing::info!("Cleaned up expired session: {}", code);
            }
            keep
        });
        before - self.sessions.len()
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Total files across all sessions.
    pub fn file_count(&self) -> usize {
        self.sessions
            .iter()
            .map(|entry| entry.value().read().files.len())
            .sum()
    }

    /// Total stored payload bytes across all sessions.
    pub fn stored_bytes(&self) -> u64 {
        self.sessions
            .iter()
            .map(|entry| {
                entry
                    .value()
                    .read()
                    .files
                    .iter()
                    .map(|f| f.payload.len() as u64)
                    .sum::<u64>()
            })
            .sum()
    }
}

/// Current unix time in milliseconds.
pub fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
