//! # Transaction Module
//!
//! Building, encoding and signing native transfers.
//!
//! ## Architecture
//!
//! ```text
//! types.rs   Transaction, TransactionData, and the ledger wire shapes
//! codec.rs   Canonical signing payload and its SHA-256 digest
//! builder.rs Fluent TransactionBuilder with width checks
//! signing.rs Ed25519 signing over the digest, and verification
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** with [`TransactionBuilder`], nonce taken from the ledger.
//! 2. **Sign** with [`sign_transaction`] using the unlocked key.
//! 3. **Verify** locally with [`verify_transaction`] before anything leaves
//!    the process.
//! 4. **Submit** the [`TransferSubmission`] form to the ledger.

pub mod builder;
pub mod codec;
pub mod signing;
pub mod types;

pub use builder::TransactionBuilder;
pub use codec::{encode, signing_payload, CodecError, TransactionFields};
pub use signing::{sign_transaction, sign_transaction_hex, verify_transaction};
pub use types::{AccountInfo, Transaction, TransactionData, TransferSubmission};
