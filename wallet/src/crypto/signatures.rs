//! # Digital Signatures
//!
//! Ed25519 signing and verification over transaction digests.
//!
//! The private key arrives here as the hex string held by the session, so
//! this is also where a malformed secret is caught. Ed25519 signatures are
//! deterministic (RFC 8032): no per-signature randomness, no nonce reuse
//! footguns.

use thiserror::Error;
use zeroize::Zeroizing;

use super::keys::{PublicKey, WalletKeypair, WalletSignature};
use crate::config::SIGNING_KEY_LENGTH;

/// Errors during signature operations.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("private key is malformed: expected {SIGNING_KEY_LENGTH} bytes of hex")]
    MalformedPrivateKey,
}

/// Sign a digest with a hex-encoded private key.
///
/// # Errors
///
/// [`SignatureError::MalformedPrivateKey`] if the key is not valid hex or
/// not exactly 32 bytes.
pub fn sign(digest: &[u8], private_key_hex: &str) -> Result<WalletSignature, SignatureError> {
    let bytes = Zeroizing::new(
        hex::decode(private_key_hex).map_err(|_| SignatureError::MalformedPrivateKey)?,
    );
    let keypair =
        WalletKeypair::from_slice(&bytes).map_err(|_| SignatureError::MalformedPrivateKey)?;
    Ok(keypair.sign(digest))
}

/// Sign a digest with an already-parsed keypair.
pub fn sign_with(keypair: &WalletKeypair, digest: &[u8]) -> WalletSignature {
    keypair.sign(digest)
}

/// Verify a signature over a digest.
///
/// Returns a plain `bool`: we don't distinguish "bad signature" from
/// "bad key" for callers.
pub fn verify(digest: &[u8], signature: &WalletSignature, public_key: &PublicKey) -> bool {
    public_key.verify(digest, signature)
}
