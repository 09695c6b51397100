//! # Session Manager
//!
//! An unlocked wallet is a persisted [`Session`]: the decrypted private key
//! plus an absolute expiry. Whoever holds the session can sign, so the
//! manager's job is mostly to make sessions disappear on time.
//!
//! ```text
//!            start()                    lock() / expiry observed
//!  Locked ───────────▶ Unlocked ────────────────────────────────▶ Locked
//!                        │  ▲
//!                        └──┘ refresh() pushes expiry forward
//! ```
//!
//! Expiry is checked lazily on every read: a session is live iff
//! `now < expires_at`, and the first read that finds it expired deletes
//! it. The auto-lock ticker just performs such a read periodically.
//!
//! The session is stored in plaintext next to the encrypted record. Anyone
//! with read access to the store during a live session can take the key.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use zeroize::{Zeroize, Zeroizing};

use super::clock::Clock;
use crate::config::SESSION_STORAGE_KEY;
use crate::error::{WalletError, WalletResult};
use crate::storage::KeyValueStore;

/// Longest session we will grant, in days.
const MAX_SESSION_DAYS: i64 = 36_500;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A persisted unlock. The key is wiped from memory when this is dropped.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    private_key: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Hex of the unlocked private key.
    pub fn private_key(&self) -> Zeroizing<String> {
        Zeroizing::new(self.private_key.clone())
    }

    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("private_key", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SessionManager
// ---------------------------------------------------------------------------

/// Owns the session slot in the store. Cheap to clone; clones share the
/// store and clock.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    duration: ChronoDuration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, duration: Duration) -> Self {
        // Clamped to a century so every expiry stays a four-digit year.
        let max = ChronoDuration::days(MAX_SESSION_DAYS);
        let duration = ChronoDuration::from_std(duration).unwrap_or(max).min(max);
        Self {
            store,
            clock,
            duration,
        }
    }

    /// Begin a session for `private_key_hex`, replacing any existing one.
    /// Returns the expiry.
    pub fn start(&self, private_key_hex: &str) -> WalletResult<DateTime<Utc>> {
        let session = Session {
            private_key: private_key_hex.to_string(),
            expires_at: self.expiry_from(self.clock.now()),
        };
        self.write(&session)?;
        info!(expires_at = %session.expires_at, "session started");
        Ok(session.expires_at)
    }

    /// Push the expiry of a live session out to a full duration from now.
    ///
    /// Returns `false` and does nothing if there is no live session: an
    /// expired session cannot be revived.
    pub fn refresh(&self) -> WalletResult<bool> {
        let Some(mut session) = self.live_session()? else {
            return Ok(false);
        };
        session.expires_at = self.expiry_from(self.clock.now());
        self.write(&session)?;
        debug!(expires_at = %session.expires_at, "session refreshed");
        Ok(true)
    }

    /// End the session. Idempotent.
    pub fn end(&self) -> WalletResult<()> {
        self.store.delete(SESSION_STORAGE_KEY)?;
        info!("session ended");
        Ok(())
    }

    /// The current session if it is still live.
    ///
    /// An expired or unreadable session is deleted on sight.
    pub fn live_session(&self) -> WalletResult<Option<Session>> {
        let Some(json) = self.store.get(SESSION_STORAGE_KEY)? else {
            return Ok(None);
        };
        let json = Zeroizing::new(json);

        let session: Session = match serde_json::from_str(&json) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "discarding unreadable session");
                self.store.delete(SESSION_STORAGE_KEY)?;
                return Ok(None);
            }
        };

        if !session.is_live_at(self.clock.now()) {
            info!(expired_at = %session.expires_at, "session expired, wallet locked");
            self.store.delete(SESSION_STORAGE_KEY)?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Whether a live session exists. Storage failures count as locked.
    pub fn is_unlocked(&self) -> bool {
        match self.live_session() {
            Ok(session) => session.is_some(),
            Err(e) => {
                warn!(error = %e, "session check failed, treating wallet as locked");
                false
            }
        }
    }

    /// The unlocked private key, or [`WalletError::WalletLocked`].
    pub fn unlocked_secret(&self) -> WalletResult<Zeroizing<String>> {
        self.live_session()?
            .map(|session| session.private_key())
            .ok_or(WalletError::WalletLocked)
    }

    /// Expiry of the live session, if any.
    pub fn expires_at(&self) -> WalletResult<Option<DateTime<Utc>>> {
        Ok(self.live_session()?.map(|s| s.expires_at))
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn write(&self, session: &Session) -> WalletResult<()> {
        let json = Zeroizing::new(
            serde_json::to_string(session)
                .map_err(|e| WalletError::CorruptRecord(format!("session: {e}")))?,
        );
        self.store.set(SESSION_STORAGE_KEY, &json)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
