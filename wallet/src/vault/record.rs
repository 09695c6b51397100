//! # Stored Wallet Record
//!
//! The one persisted value that outlives a session. Public fields are
//! plaintext so the UI can show an address without a password; both
//! secrets are sealed separately, each under its own salt.
//!
//! ```json
//! {
//!   "version": 2,
//!   "address": "c578…",
//!   "publicKey": "c578…",
//!   "encryptedPrivateKey": { "kdf": {…}, "salt": "…", "ciphertext": "…" },
//!   "encryptedMnemonic":   { "kdf": {…}, "salt": "…", "ciphertext": "…" },
//!   "createdAt": "2026-10-18T09:00:00Z"
//! }
//! ```
//!
//! Records written before mnemonic storage existed have no
//! `encryptedMnemonic`; they still unlock and sign.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::config::WALLET_RECORD_VERSION;
use crate::crypto::encryption::{open_with_password, seal_with_password, EncryptionError};
use crate::crypto::kdf::KdfParams;
use crate::crypto::keys::WalletKeypair;
use crate::crypto::SealedSecret;
use crate::error::{WalletError, WalletResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWalletRecord {
    pub version: u32,
    /// Lowercase hex of the public key.
    pub address: String,
    pub public_key: String,
    pub encrypted_private_key: SealedSecret,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_mnemonic: Option<SealedSecret>,
    pub created_at: DateTime<Utc>,
}

impl StoredWalletRecord {
    /// Seal `keypair` (and `mnemonic`, if given) under `password`.
    pub fn seal(
        keypair: &WalletKeypair,
        mnemonic: Option<&str>,
        password: &str,
        kdf: &KdfParams,
        created_at: DateTime<Utc>,
    ) -> WalletResult<Self> {
        let secret = keypair.secret_bytes();
        let encrypted_private_key =
            seal_with_password(password, secret.as_slice(), kdf).map_err(seal_error)?;
        let encrypted_mnemonic = mnemonic
            .map(|phrase| seal_with_password(password, phrase.as_bytes(), kdf))
            .transpose()
            .map_err(seal_error)?;

        Ok(Self {
            version: WALLET_RECORD_VERSION,
            address: keypair.address(),
            public_key: keypair.public_key().to_hex(),
            encrypted_private_key,
            encrypted_mnemonic,
            created_at,
        })
    }

    /// Decrypt the signing key.
    ///
    /// A wrong password yields [`WalletError::InvalidPassword`]. A key that
    /// decrypts but doesn't match `public_key` means the record was
    /// tampered with or half-written.
    pub fn open_keypair(&self, password: &str) -> WalletResult<WalletKeypair> {
        let secret = open_with_password(password, &self.encrypted_private_key).map_err(open_error)?;
        let keypair = WalletKeypair::from_slice(&secret)
            .map_err(|e| WalletError::CorruptRecord(format!("private key: {e}")))?;

        if keypair.public_key().to_hex() != self.public_key {
            return Err(WalletError::CorruptRecord(
                "private key does not match stored public key".to_string(),
            ));
        }
        Ok(keypair)
    }

    /// Decrypt the recovery phrase.
    pub fn open_mnemonic(&self, password: &str) -> WalletResult<Zeroizing<String>> {
        let sealed = self
            .encrypted_mnemonic
            .as_ref()
            .ok_or(WalletError::MnemonicUnavailable)?;
        let bytes = open_with_password(password, sealed).map_err(open_error)?;
        let phrase = std::str::from_utf8(&bytes)
            .map_err(|_| WalletError::CorruptRecord("mnemonic is not UTF-8".to_string()))?;
        Ok(Zeroizing::new(phrase.to_string()))
    }

    /// Re-seal every secret under `new_password`, keeping identity and
    /// creation time. Fails with [`WalletError::InvalidPassword`] before
    /// producing anything if `old_password` is wrong.
    pub fn reseal(
        &self,
        old_password: &str,
        new_password: &str,
        kdf: &KdfParams,
    ) -> WalletResult<Self> {
        let keypair = self.open_keypair(old_password)?;
        let mnemonic = match self.open_mnemonic(old_password) {
            Ok(phrase) => Some(phrase),
            Err(WalletError::MnemonicUnavailable) => None,
            Err(e) => return Err(e),
        };
        Self::seal(
            &keypair,
            mnemonic.as_deref().map(String::as_str),
            new_password,
            kdf,
            self.created_at,
        )
    }

    pub fn has_mnemonic(&self) -> bool {
        self.encrypted_mnemonic.is_some()
    }
}

fn seal_error(err: EncryptionError) -> WalletError {
    WalletError::Sealing(err.to_string())
}

fn open_error(err: EncryptionError) -> WalletError {
    match err {
        EncryptionError::DecryptFailed => WalletError::InvalidPassword,
        other => WalletError::CorruptRecord(other.to_string()),
    }
}
