//! Transaction signing and signature checks.
//!
//! The signed message is the 32-byte digest from the codec, never the raw
//! payload. The ledger does the same, so both sides agree on what a
//! signature covers.

use super::types::Transaction;
use crate::crypto::keys::WalletKeypair;
use crate::crypto::signatures;
use crate::error::{WalletError, WalletResult};
use tracing::debug;

/// Sign `tx` in place with `keypair` and return it for chaining.
///
/// The caller is responsible for `keypair` matching `tx.sender`; use
/// [`verify_transaction`] afterwards to confirm. Re-signing overwrites any
/// previous signature.
pub fn sign_transaction<'a>(
    tx: &'a mut Transaction,
    keypair: &WalletKeypair,
) -> WalletResult<&'a Transaction> {
    let digest = tx.digest()?;
    tx.signature = Some(signatures::sign_with(keypair, &digest));
    debug!(digest = %hex::encode(digest), nonce = tx.nonce, "transaction signed");
    Ok(tx)
}

/// Sign `tx` with a hex-encoded secret key, as held by the session.
pub fn sign_transaction_hex<'a>(
    tx: &'a mut Transaction,
    private_key_hex: &str,
) -> WalletResult<&'a Transaction> {
    let digest = tx.digest()?;
    tx.signature = Some(signatures::sign(&digest, private_key_hex)?);
    debug!(digest = %hex::encode(digest), nonce = tx.nonce, "transaction signed");
    Ok(tx)
}

/// `true` iff `tx` carries a signature that verifies against its sender.
pub fn verify_transaction(tx: &Transaction) -> bool {
    let Some(signature) = tx.signature.as_ref() else {
        return false;
    };
    match tx.digest() {
        Ok(digest) => signatures::verify(&digest, signature, &tx.sender),
        Err(_) => false,
    }
}

/// Like [`verify_transaction`], but as an error for `?` chains.
pub(crate) fn ensure_verifies(tx: &Transaction) -> WalletResult<()> {
    if verify_transaction(tx) {
        Ok(())
    } else {
        Err(WalletError::SigningError(
            "signature does not verify against sender".to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
