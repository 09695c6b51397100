//! # AES-256-GCM Encryption
//!
//! Authenticated encryption for wallet secrets at rest.
//!
//! Two layers live here:
//!
//! - [`encrypt`] / [`decrypt`] work on a raw 32-byte key and use the
//!   `nonce || ciphertext` framing.
//! - [`seal_with_password`] / [`open_with_password`] derive that key from a
//!   password with Argon2id (see [`super::kdf`]) and package salt, nonce,
//!   cost parameters and ciphertext into a [`SealedSecret`] that can be
//!   stored as JSON.
//!
//! GCM's authentication tag is what tells a wrong password apart from a
//! right one: a mismatched key never yields plaintext, it yields
//! [`EncryptionError::DecryptFailed`].
//!
//! ## Nonce management
//!
//! Random 96-bit nonces, and a fresh salt (hence a fresh key) for every
//! sealed value. Nonce reuse under one key is not reachable from here.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

use super::kdf::{derive_key, KdfError, KdfParams};
use crate::config::{AES_KEY_LENGTH, AES_NONCE_LENGTH, KDF_SALT_LENGTH};

/// Errors that can occur during encryption/decryption.
///
/// "Wrong key" and "corrupted ciphertext" are the same error on purpose.
#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("encryption failed")]
    EncryptFailed,

    #[error("decryption failed -- wrong password or corrupted ciphertext")]
    DecryptFailed,

    #[error("ciphertext too short: must be at least {AES_NONCE_LENGTH} bytes")]
    CiphertextTooShort,

    #[error("sealed secret is malformed: {0}")]
    Malformed(String),

    #[error(transparent)]
    Kdf(#[from] KdfError),
}

/// Encrypt plaintext with AES-256-GCM under a random nonce.
///
/// Returns `nonce || ciphertext`; the ciphertext carries the 16-byte tag.
pub fn encrypt(key: &[u8; AES_KEY_LENGTH], plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| EncryptionError::EncryptFailed)?;

    let mut nonce_bytes = [0u8; AES_NONCE_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| EncryptionError::EncryptFailed)?;

    let mut out = Vec::with_capacity(AES_NONCE_LENGTH + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt data produced by [`encrypt`].
pub fn decrypt(
    key: &[u8; AES_KEY_LENGTH],
    data: &[u8],
) -> Result<Zeroizing<Vec<u8>>, EncryptionError> {
    if data.len() < AES_NONCE_LENGTH {
        return Err(EncryptionError::CiphertextTooShort);
    }

    let (nonce_bytes, ciphertext) = data.split_at(AES_NONCE_LENGTH);
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| EncryptionError::DecryptFailed)?;
    let nonce = Nonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| EncryptionError::DecryptFailed)
}

// ---------------------------------------------------------------------------
// Password sealing
// ---------------------------------------------------------------------------

/// A secret encrypted under a password, in its stored shape.
///
/// ```json
/// { "kdf": { "mCost": 19456, "tCost": 2, "pCost": 1 },
///   "salt": "<32 hex>", "ciphertext": "<hex of nonce || ct || tag>" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedSecret {
    pub kdf: KdfParams,
    pub salt: String,
    pub ciphertext: String,
}

/// Encrypt `plaintext` under a key derived from `password`.
pub fn seal_with_password(
    password: &str,
    plaintext: &[u8],
    params: &KdfParams,
) -> Result<SealedSecret, EncryptionError> {
    let mut salt = [0u8; KDF_SALT_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut salt);

    let key = derive_key(password, &salt, params)?;
    let ciphertext = encrypt(&key, plaintext)?;

    Ok(SealedSecret {
        kdf: *params,
        salt: hex::encode(salt),
        ciphertext: hex::encode(ciphertext),
    })
}

/// Decrypt a [`SealedSecret`] with `password`.
///
/// A wrong password surfaces as [`EncryptionError::DecryptFailed`]; a
/// record whose hex or salt is damaged surfaces as
/// [`EncryptionError::Malformed`].
pub fn open_with_password(
    password: &str,
    sealed: &SealedSecret,
) -> Result<Zeroizing<Vec<u8>>, EncryptionError> {
    let salt = hex::decode(&sealed.salt).map_err(|e| EncryptionError::Malformed(e.to_string()))?;
    if salt.len() != KDF_SALT_LENGTH {
        return Err(EncryptionError::Malformed(format!(
            "salt is {} bytes",
            salt.len()
        )));
    }
    let data =
        hex::decode(&sealed.ciphertext).map_err(|e| EncryptionError::Malformed(e.to_string()))?;

    let key = derive_key(password, &salt, &sealed.kdf)?;
    decrypt(&key, &data)
}
