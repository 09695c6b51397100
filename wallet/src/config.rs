//! # Wallet Configuration & Constants
//!
//! Every magic number in the wallet lives here. The storage keys and the
//! transfer tag are part of the on-disk and on-wire contracts respectively;
//! changing them after release strands existing wallets or breaks every
//! signature the node verifies. Choose wisely.

use std::time::Duration;

use crate::crypto::kdf::KdfParams;

// ---------------------------------------------------------------------------
// Storage Keys
// ---------------------------------------------------------------------------

/// Fixed key under which the single [`StoredWalletRecord`] is persisted.
///
/// [`StoredWalletRecord`]: crate::vault::StoredWalletRecord
pub const WALLET_STORAGE_KEY: &str = "keel.wallet";

/// Fixed key under which the unlocked session is persisted.
pub const SESSION_STORAGE_KEY: &str = "keel.session";

/// Version written into every new wallet record. Version 1 used the raw
/// password as the cipher secret and is not readable by this crate.
pub const WALLET_RECORD_VERSION: u32 = 2;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 secret (seed) length in bytes.
pub const SIGNING_KEY_LENGTH: usize = 32;

/// Ed25519 public key length. Addresses are the hex encoding of these bytes.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// SHA-256 digest length.
pub const DIGEST_LENGTH: usize = 32;

/// AES-256-GCM key length in bytes.
pub const AES_KEY_LENGTH: usize = 32;

/// AES-256-GCM nonce length in bytes. Twelve. Not sixteen.
pub const AES_NONCE_LENGTH: usize = 12;

/// AES-256-GCM authentication tag length in bytes.
pub const AES_TAG_LENGTH: usize = 16;

/// Length of the random salt fed to Argon2id for every sealed field.
pub const KDF_SALT_LENGTH: usize = 16;

/// Largest Argon2id memory cost a record may ask for, in KiB (1 GiB).
pub const MAX_KDF_M_COST: u32 = 1024 * 1024;

/// Largest Argon2id pass count a record may ask for.
pub const MAX_KDF_T_COST: u32 = 16;

/// Largest Argon2id lane count a record may ask for.
pub const MAX_KDF_P_COST: u32 = 16;

/// Words in a freshly generated recovery phrase (128 bits of entropy).
pub const MNEMONIC_WORD_COUNT: usize = 12;

/// Entropy behind a [`MNEMONIC_WORD_COUNT`]-word phrase, in bytes.
pub const MNEMONIC_ENTROPY_LENGTH: usize = 16;

// ---------------------------------------------------------------------------
// Transaction Framing
// ---------------------------------------------------------------------------

/// ASCII tag identifying a native transfer inside the signing payload.
/// Not length-prefixed, so the tag vocabulary is fixed.
pub const NATIVE_TRANSFER_TAG: &str = "NativeTransfer";

// ---------------------------------------------------------------------------
// Session Timing
// ---------------------------------------------------------------------------

/// How long an unlocked session stays live without activity.
pub const DEFAULT_SESSION_DURATION: Duration = Duration::from_secs(30 * 60);

/// How often the auto-lock ticker polls the session for expiry.
pub const AUTO_LOCK_POLL_INTERVAL: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Password Policy
// ---------------------------------------------------------------------------

/// Minimum length that earns the length point.
pub const PASSWORD_MIN_LENGTH: usize = 12;

/// Highest score the policy hands out.
pub const PASSWORD_MAX_SCORE: u8 = 4;

/// Points removed when the password starts with a common pattern.
pub const PASSWORD_PATTERN_PENALTY: u8 = 2;

/// Case-insensitive prefixes that mark a password as predictable.
pub const COMMON_PASSWORD_PREFIXES: &[&str] = &["123", "abc", "password", "qwerty"];

// ---------------------------------------------------------------------------
// WalletConfig
// ---------------------------------------------------------------------------

/// Runtime knobs for a [`WalletFacade`](crate::facade::WalletFacade).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletConfig {
    /// Length of the unlocked window, refreshed by user activity.
    pub session_duration: Duration,
    /// Argon2id cost used when sealing new secrets. Existing records keep
    /// the parameters they were written with.
    pub kdf: KdfParams,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            session_duration: DEFAULT_SESSION_DURATION,
            kdf: KdfParams::default(),
        }
    }
}

impl WalletConfig {
    /// Overrides the session window.
    pub fn with_session_duration(mut self, duration: Duration) -> Self {
        self.session_duration = duration;
        self
    }

    /// Overrides the KDF cost.
    pub fn with_kdf(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_are_distinct() {
        assert_ne!(WALLET_STORAGE_KEY, SESSION_STORAGE_KEY);
    }

    #[test]
    fn test_crypto_parameter_sizes() {
        assert_eq!(SIGNING_KEY_LENGTH, 32);
        assert_eq!(VERIFYING_KEY_LENGTH, 32);
        assert_eq!(SIGNATURE_LENGTH, 64);
        assert_eq!(DIGEST_LENGTH, 32);
        assert_eq!(AES_KEY_LENGTH, 32);
        assert_eq!(AES_NONCE_LENGTH, 12);
    }

    #[test]
    fn test_mnemonic_entropy_matches_word_count() {
        // 11 bits per word, 1 checksum bit per 32 bits of entropy.
        assert_eq!(MNEMONIC_ENTROPY_LENGTH * 8 * 33 / 32 / 11, MNEMONIC_WORD_COUNT);
    }

    #[test]
    fn test_transfer_tag_is_ascii() {
        assert!(NATIVE_TRANSFER_TAG.is_ascii());
    }

    #[test]
    fn test_default_session_is_thirty_minutes() {
        let config = WalletConfig::default();
        assert_eq!(config.session_duration, Duration::from_secs(1800));
        assert!(AUTO_LOCK_POLL_INTERVAL < config.session_duration);
    }
}
