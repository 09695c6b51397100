//! # Wallet Addresses
//!
//! An address is the lowercase hex of the 32-byte Ed25519 public key. No
//! hashing, no checksum, no prefix:
//!
//! ```text
//! public_key (32 bytes) -> hex -> c5785e1865b708938aff8161d573006496663b1aa10834e396dc566869a2c66a
//! ```
//!
//! Parsing accepts an optional `0x` prefix and either case, since users
//! paste addresses from all sorts of places.

use crate::config::VERIFYING_KEY_LENGTH;
use crate::crypto::keys::PublicKey;
use crate::error::{WalletError, WalletResult};

/// Parse a user-supplied address into the 32 key bytes it names.
///
/// The bytes are not checked against the curve; the receiver of a transfer
/// is whatever 32 bytes the user meant, and the ledger is the authority on
/// whether an account exists there.
pub fn parse_address(input: &str) -> WalletResult<PublicKey> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let bytes = hex::decode(digits)
        .map_err(|e| WalletError::InvalidAddress(format!("{trimmed}: {e}")))?;

    let array: [u8; VERIFYING_KEY_LENGTH] =
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| WalletError::InvalidFieldLength {
                field: "receiver",
                expected: VERIFYING_KEY_LENGTH,
                actual: bytes.len(),
            })?;

    Ok(PublicKey::from_bytes(array))
}

/// Canonical display form of an address.
pub fn format_address(public_key: &PublicKey) -> String {
    public_key.to_hex()
}
