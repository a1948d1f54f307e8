//! One-time verification codes linking a Discord user to a wallet proof.
//!
//! The bot issues a code when a user runs `/verify`. The web page reads the code's context
//! without consuming it and the wallet submission consumes it. Codes live in memory only
//! and expire after a configurable TTL, so a restart invalidates outstanding links.

use rand::Rng;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

use crate::server::model::verification::PendingVerification;

/// Number of random bytes in a code, rendered as twice as many hex characters.
const CODE_BYTES: usize = 32;

#[derive(Clone)]
struct PendingEntry {
    pending: PendingVerification,
    expires_at: Instant,
}

impl PendingEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Expiring in-memory store of pending verifications keyed by code.
///
/// Clones share the same store.
#[derive(Clone)]
pub struct VerificationCodeService {
    codes: Arc<RwLock<HashMap<String, PendingEntry>>>,
    ttl: Duration,
}

impl VerificationCodeService {
    pub fn new(ttl: Duration) -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stores a pending verification under a fresh random code.
    ///
    /// Expired entries are dropped on the way so the map cannot grow without bound.
    ///
    /// # Returns
    /// - `String` - 64 lowercase hex characters
    pub async fn issue(&self, pending: PendingVerification) -> String {
        let code = Self::generate_code();
        let entry = PendingEntry {
            pending,
            expires_at: Instant::now() + self.ttl,
        };

        let mut codes = self.codes.write().await;
        codes.retain(|_, entry| !entry.is_expired());
        codes.insert(code.clone(), entry);

        code
    }

    /// Reads a pending verification without consuming it.
    ///
    /// # Returns
    /// - `Some(PendingVerification)` - Code exists and has not expired
    /// - `None` - Unknown or expired code; an expired entry is removed
    pub async fn peek(&self, code: &str) -> Option<PendingVerification> {
        let mut codes = self.codes.write().await;

        if codes.get(code)?.is_expired() {
            codes.remove(code);
            return None;
        }

        codes.get(code).map(|entry| entry.pending.clone())
    }

    /// Removes and returns a pending verification so the code cannot be reused.
    ///
    /// # Returns
    /// - `Some(PendingVerification)` - Code existed and had not expired
    /// - `None` - Unknown, already used or expired code
    pub async fn consume(&self, code: &str) -> Option<PendingVerification> {
        let entry = self.codes.write().await.remove(code)?;

        if entry.is_expired() {
            return None;
        }

        Some(entry.pending)
    }

    fn generate_code() -> String {
        let mut bytes = [0u8; CODE_BYTES];
        rand::rng().fill(&mut bytes);

        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
