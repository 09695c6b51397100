//! # Transaction Codec
//!
//! Canonical signing bytes for a transaction, and their SHA-256 digest.
//! The ledger recomputes the same bytes to check signatures, so the layout
//! is frozen:
//!
//! ```text
//! offset  size  field
//! 0       32    sender public key
//! 32      32    receiver public key
//! 64      8     nonce, u64 little-endian
//! 72      n     kind tag, ASCII, no length prefix ("NativeTransfer", n = 14)
//! 72+n    8     amount, u64 little-endian
//! ```
//!
//! No separators, no framing. Fixed widths everywhere except the tag,
//! which is unique per kind.

use thiserror::Error;

use super::types::TransactionData;
use crate::config::VERIFYING_KEY_LENGTH;
use crate::crypto::hash::sha256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid length for {field}: expected {expected} bytes, got {actual}")]
    InvalidFieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Raw inputs to the encoder. Keys are slices so that callers holding
/// untrusted bytes get a length error instead of a panic.
#[derive(Debug, Clone, Copy)]
pub struct TransactionFields<'a> {
    pub sender: &'a [u8],
    pub receiver: &'a [u8],
    pub nonce: u64,
    pub data: TransactionData,
}

/// Build the exact byte string that gets hashed and signed.
pub fn signing_payload(fields: &TransactionFields<'_>) -> Result<Vec<u8>, CodecError> {
    check_length("sender", fields.sender, VERIFYING_KEY_LENGTH)?;
    check_length("receiver", fields.receiver, VERIFYING_KEY_LENGTH)?;

    let tag = fields.data.tag().as_bytes();
    let mut buf = Vec::with_capacity(2 * VERIFYING_KEY_LENGTH + 8 + tag.len() + 8);

    buf.extend_from_slice(fields.sender);
    buf.extend_from_slice(fields.receiver);
    buf.extend_from_slice(&fields.nonce.to_le_bytes());
    buf.extend_from_slice(tag);
    match fields.data {
        TransactionData::NativeTransfer { amount } => {
            buf.extend_from_slice(&amount.to_le_bytes());
        }
    }

    Ok(buf)
}

/// SHA-256 of [`signing_payload`]. This is what gets signed.
pub fn encode(fields: &TransactionFields<'_>) -> Result<[u8; 32], CodecError> {
    Ok(sha256(&signing_payload(fields)?))
}

fn check_length(field: &'static str, bytes: &[u8], expected: usize) -> Result<(), CodecError> {
    if bytes.len() != expected {
        return Err(CodecError::InvalidFieldLength {
            field,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}
