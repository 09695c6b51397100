//! # Key Management
//!
//! Ed25519 keypair handling for the wallet identity.
//!
//! The wallet holds exactly one Ed25519 keypair at a time. This module owns
//! the conversions between that keypair and the hex strings the rest of the
//! system passes around: the private key (32-byte seed), the public key and
//! the address (which is simply the hex-encoded public key).
//!
//! ## Security considerations
//!
//! - Signing keys are zeroized on drop (thanks, ed25519-dalek).
//! - Key bytes are never logged. `Debug` prints the public half only.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{SIGNATURE_LENGTH, SIGNING_KEY_LENGTH, VERIFYING_KEY_LENGTH};

/// Errors that can occur during key operations.
///
/// Deliberately vague about *why* a secret was rejected.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key: expected {SIGNING_KEY_LENGTH} bytes")]
    InvalidSecretKey,

    #[error("invalid public key: expected {VERIFYING_KEY_LENGTH} bytes on the curve")]
    InvalidPublicKey,

    #[error("invalid signature: expected {SIGNATURE_LENGTH} bytes")]
    InvalidSignature,
}

/// The wallet's Ed25519 keypair.
///
/// `WalletKeypair` intentionally does NOT implement `Serialize`. Writing a
/// private key anywhere should be a deliberate act, so it goes through
/// [`secret_key_hex`](Self::secret_key_hex) and the vault.
pub struct WalletKeypair {
    signing_key: SigningKey,
}

/// The public half of the wallet identity. Its hex form is the address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey {
    bytes: [u8; VERIFYING_KEY_LENGTH],
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WalletSignature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl WalletKeypair {
    /// Generate a random keypair from the OS RNG.
    ///
    /// Wallets are normally created from a mnemonic; this is for tests and
    /// benchmarks that only need *a* key.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Build the keypair from a 32-byte seed. In Ed25519 the seed *is* the
    /// secret key; the public key follows from standard key expansion.
    pub fn from_seed(seed: &[u8; SIGNING_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Build the keypair from a byte slice, checking the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let seed: &[u8; SIGNING_KEY_LENGTH] =
            bytes.try_into().map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(seed))
    }

    /// Parse a hex-encoded private key (64 hex characters).
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = Zeroizing::new(hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?);
        Self::from_slice(&bytes)
    }

    /// Returns the public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// The wallet address: hex of the public key.
    pub fn address(&self) -> String {
        self.public_key().to_hex()
    }

    /// Sign arbitrary bytes. Deterministic per RFC 8032.
    pub fn sign(&self, message: &[u8]) -> WalletSignature {
        WalletSignature {
            bytes: self.signing_key.sign(message).to_bytes(),
        }
    }

    /// Verify a signature against this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &WalletSignature) -> bool {
        self.public_key().verify(message, signature)
    }

    /// Hex-encoded private key, wrapped so the string is wiped on drop.
    ///
    /// **Handle with care.** This is the only thing between an attacker
    /// and the funds.
    pub fn secret_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.secret_bytes().as_slice()))
    }

    /// Raw 32-byte private key, wiped on drop.
    pub fn secret_bytes(&self) -> Zeroizing<[u8; SIGNING_KEY_LENGTH]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }
}

impl Clone for WalletKeypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for WalletKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletKeypair(pub={})", self.public_key().to_hex())
    }
}

impl PartialEq for WalletKeypair {
    /// Compares public keys only; secret material is never compared in
    /// variable time.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for WalletKeypair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    /// Wrap raw bytes without curve validation.
    pub fn from_bytes(bytes: [u8; VERIFYING_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parse from a slice, rejecting wrong lengths and off-curve points.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; VERIFYING_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// Parse a hex-encoded public key / address.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::try_from_slice(&bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; VERIFYING_KEY_LENGTH] {
        &self.bytes
    }

    /// Hex encoding, 64 characters. Doubles as the address.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Verify a signature. A key that is not a valid point just fails.
    pub fn verify(&self, message: &[u8], signature: &WalletSignature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let dalek_sig = DalekSignature::from_bytes(&signature.bytes);
        verifying_key.verify(message, &dalek_sig).is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// WalletSignature
// ---------------------------------------------------------------------------

impl WalletSignature {
    /// Wrap raw signature bytes.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parse from a slice of exactly 64 bytes.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; SIGNATURE_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidSignature)?;
        Ok(Self { bytes })
    }

    /// Parse a hex-encoded signature (128 characters).
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidSignature)?;
        Self::try_from_slice(&bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// Hex encoding, 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for WalletSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for WalletSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "WalletSignature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}
