//! Short-lived, token-keyed storage for remediation outputs.
//!
//! A boundary layer that exposes separate "download the fixed CSV" and
//! "download the faulty rows" endpoints needs somewhere to keep a finished
//! remediation between the fix request and the download requests. This
//! store keys each outcome by a random token returned to the caller;
//! entries are consumed on first take and expire after a TTL, so nothing
//! leaks across requests or sessions.

use crate::types::RemediationOutcome;
use parking_lot::Mutex;
use rand::RngCore;
use rand::rngs::OsRng;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default lifetime of a stored result.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Opaque handle to a stored remediation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultToken(String);

impl ResultToken {
    fn generate() -> Self {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        let mut token = String::with_capacity(32);
        for byte in bytes {
            token.push_str(&format!("{:02x}", byte));
        }
        Self(token)
    }

    /// The token's string form, suitable for returning to a client.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResultToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

struct StoredEntry {
    outcome: RemediationOutcome,
    inserted_at: Instant,
}

/// In-memory store of remediation outcomes, keyed by [`ResultToken`].
pub struct ResultStore {
    entries: Mutex<HashMap<ResultToken, StoredEntry>>,
    ttl: Duration,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ResultStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Store an outcome and return the token that retrieves it.
    pub fn insert(&self, outcome: RemediationOutcome) -> ResultToken {
        let token = ResultToken::generate();
        let mut entries = self.entries.lock();
        Self::sweep(&mut entries, self.ttl);
        entries.insert(
            token.clone(),
            StoredEntry {
                outcome,
                inserted_at: Instant::now(),
            },
        );
        debug!(token = %token.as_str(), "stored remediation outcome");
        token
    }

    /// Take an outcome out of the store. Each token is good for exactly one
    /// retrieval; expired entries are treated as absent.
    pub fn take(&self, token: &ResultToken) -> Option<RemediationOutcome> {
        let mut entries = self.entries.lock();
        Self::sweep(&mut entries, self.ttl);
        entries.remove(token).map(|entry| entry.outcome)
    }

    /// Number of live entries (expired entries are swept first).
    pub fn len(&self) -> usize {
        let mut entries = self.entries.lock();
        Self::sweep(&mut entries, self.ttl);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sweep(entries: &mut HashMap<ResultToken, StoredEntry>, ttl: Duration) {
        entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
    }
}
