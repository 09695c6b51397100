//! Fluent builder for unsigned transactions.
//!
//! Keys come in as byte slices (usually straight out of hex decoding), so
//! [`TransactionBuilder::build`] is where width checks happen.

use super::codec::CodecError;
use super::types::{Transaction, TransactionData};
use crate::config::VERIFYING_KEY_LENGTH;
use crate::crypto::keys::PublicKey;

/// Assembles a [`Transaction`] field by field.
///
/// ```rust
/// use keel_wallet::transaction::TransactionBuilder;
///
/// let tx = TransactionBuilder::native_transfer(100)
///     .sender(&[1u8; 32])
///     .receiver(&[2u8; 32])
///     .nonce(1)
///     .build()
///     .unwrap();
/// assert!(!tx.is_signed());
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    sender: Vec<u8>,
    receiver: Vec<u8>,
    nonce: u64,
    data: TransactionData,
}

impl TransactionBuilder {
    /// Start a native transfer of `amount` base units. Zero is allowed.
    pub fn native_transfer(amount: u64) -> Self {
        Self {
            sender: Vec::new(),
            receiver: Vec::new(),
            nonce: 0,
            data: TransactionData::NativeTransfer { amount },
        }
    }

    pub fn sender(mut self, public_key: &[u8]) -> Self {
        self.sender = public_key.to_vec();
        self
    }

    pub fn receiver(mut self, public_key: &[u8]) -> Self {
        self.receiver = public_key.to_vec();
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Finish the transaction. Fails if either key is not exactly 32 bytes.
    pub fn build(self) -> Result<Transaction, CodecError> {
        Ok(Transaction {
            sender: fixed_key("sender", &self.sender)?,
            receiver: fixed_key("receiver", &self.receiver)?,
            nonce: self.nonce,
            data: self.data,
            signature: None,
        })
    }
}

fn fixed_key(field: &'static str, bytes: &[u8]) -> Result<PublicKey, CodecError> {
    let array: [u8; VERIFYING_KEY_LENGTH] =
        bytes
            .try_into()
            .map_err(|_| CodecError::InvalidFieldLength {
                field,
                expected: VERIFYING_KEY_LENGTH,
                actual: bytes.len(),
            })?;
    Ok(PublicKey::from_bytes(array))
}
