//! # Wallet Errors
//!
//! The error surface callers see. Component modules keep their own narrow
//! error enums; this one folds them into the taxonomy the UI routes on:
//!
//! | Variant              | Recovery                                  |
//! |----------------------|-------------------------------------------|
//! | `InvalidMnemonic`    | user re-enters the phrase                 |
//! | `InvalidPassword`    | user retries; nothing was mutated         |
//! | `NoWalletFound`      | route to the create/import flow           |
//! | `WalletLocked`       | prompt for unlock                         |
//! | `InvalidFieldLength` | caller bug                                |
//! | `SigningError`       | caller bug                                |
//! | `Ledger`             | surfaced verbatim, never retried          |

use thiserror::Error;

use crate::crypto::signatures::SignatureError;
use crate::identity::mnemonic::MnemonicError;
use crate::ledger::LedgerError;
use crate::storage::StorageError;
use crate::transaction::codec::CodecError;

/// Everything that can go wrong behind the [`WalletFacade`](crate::WalletFacade).
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid password")]
    InvalidPassword,

    #[error("no wallet found")]
    NoWalletFound,

    #[error("wallet is locked")]
    WalletLocked,

    #[error("invalid length for {field}: expected {expected} bytes, got {actual}")]
    InvalidFieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("signing failed: {0}")]
    SigningError(String),

    #[error("no mnemonic stored for this wallet")]
    MnemonicUnavailable,

    /// Only raised by wallet creation; the vault itself accepts any password.
    #[error("password too weak (score {score}/4)")]
    WeakPassword { score: u8, feedback: Vec<String> },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("unsupported wallet record version {0}")]
    UnsupportedRecordVersion(u32),

    #[error("wallet record is corrupt: {0}")]
    CorruptRecord(String),

    #[error("failed to seal wallet secret: {0}")]
    Sealing(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type WalletResult<T> = Result<T, WalletError>;

impl From<MnemonicError> for WalletError {
    fn from(err: MnemonicError) -> Self {
        match err {
            MnemonicError::InvalidMnemonic(reason) => WalletError::InvalidMnemonic(reason),
            MnemonicError::EntropyRejected(reason) => WalletError::Sealing(reason),
        }
    }
}

impl From<CodecError> for WalletError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::InvalidFieldLength {
                field,
                expected,
                actual,
            } => WalletError::InvalidFieldLength {
                field,
                expected,
                actual,
            },
        }
    }
}

impl From<SignatureError> for WalletError {
    fn from(err: SignatureError) -> Self {
        WalletError::SigningError(err.to_string())
    }
}

impl WalletError {
    /// `true` for errors the user can fix by retrying with different input
    /// or by unlocking.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WalletError::InvalidMnemonic(_)
                | WalletError::InvalidPassword
                | WalletError::WalletLocked
                | WalletError::WeakPassword { .. }
                | WalletError::InvalidAddress(_)
        )
    }
}
