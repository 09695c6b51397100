//! Core type definitions for wallet transactions.
//!
//! There is exactly one transaction kind today, a native transfer. Keys and
//! signatures are held as fixed-width byte types so a built transaction can
//! never carry a wrong-length field; conversion to hex happens at the edges.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::codec::{encode, CodecError, TransactionFields};
use crate::config::NATIVE_TRANSFER_TAG;
use crate::crypto::keys::{PublicKey, WalletSignature};

// ---------------------------------------------------------------------------
// TransactionData
// ---------------------------------------------------------------------------

/// The operation a transaction performs.
///
/// Serialized externally tagged, which is the shape the ledger expects:
/// `{"NativeTransfer": {"amount": 100}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionData {
    /// Move `amount` base units from sender to receiver.
    NativeTransfer { amount: u64 },
}

impl TransactionData {
    /// ASCII tag written into the signing payload ahead of the body.
    ///
    /// Every variant gets a distinct tag so two kinds can never encode to
    /// the same bytes.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::NativeTransfer { .. } => NATIVE_TRANSFER_TAG,
        }
    }

    /// Transfer amount, in base units.
    pub fn amount(&self) -> u64 {
        match self {
            Self::NativeTransfer { amount } => *amount,
        }
    }
}

impl fmt::Display for TransactionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativeTransfer { amount } => write!(f, "NativeTransfer({amount})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A wallet transaction, signed or not.
///
/// Built by [`TransactionBuilder`](super::builder::TransactionBuilder) and
/// signed by [`sign_transaction`](super::signing::sign_transaction). The
/// signature covers [`digest`](Transaction::digest), which excludes the
/// signature itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub sender: PublicKey,
    pub receiver: PublicKey,
    pub nonce: u64,
    pub data: TransactionData,
    pub signature: Option<WalletSignature>,
}

impl Transaction {
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    pub fn amount(&self) -> u64 {
        self.data.amount()
    }

    /// Borrow the signed fields for the codec.
    pub fn fields(&self) -> TransactionFields<'_> {
        TransactionFields {
            sender: self.sender.as_bytes(),
            receiver: self.receiver.as_bytes(),
            nonce: self.nonce,
            data: self.data,
        }
    }

    /// The 32-byte digest the signature covers.
    pub fn digest(&self) -> Result<[u8; 32], CodecError> {
        encode(&self.fields())
    }

    /// Hex view of the signature, if any.
    pub fn signature_hex(&self) -> Option<String> {
        self.signature.map(|sig| sig.to_hex())
    }

    /// Convert to the byte-array shape the ledger accepts.
    ///
    /// Returns `None` for an unsigned transaction; the ledger never sees one.
    pub fn to_submission(&self) -> Option<TransferSubmission> {
        let signature = self.signature?;
        Some(TransferSubmission {
            sender: self.sender.as_bytes().to_vec(),
            receiver: self.receiver.as_bytes().to_vec(),
            nonce: self.nonce,
            data: self.data,
            signature: signature.as_bytes().to_vec(),
        })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} nonce={} {}",
            self.sender, self.receiver, self.nonce, self.data
        )
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Signed transfer as the ledger receives it.
///
/// Keys and signature travel as arrays of byte values, not hex:
///
/// ```json
/// { "sender": [0, 0, ...], "receiver": [...], "nonce": 1,
///   "data": { "NativeTransfer": { "amount": 100 } }, "signature": [...] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSubmission {
    pub sender: Vec<u8>,
    pub receiver: Vec<u8>,
    pub nonce: u64,
    pub data: TransactionData,
    pub signature: Vec<u8>,
}

/// Account state reported by the ledger.
///
/// `nonce` is the value the account's next transaction must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountInfo {
    pub balance: u64,
    pub nonce: u64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
