// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Keel Wallet: Core Library
//!
//! Client-side, non-custodial key management and transaction signing. The
//! private key is born from a twelve-word phrase, sleeps encrypted under a
//! password, wakes up for a bounded session, and signs transfers byte-for-
//! byte the way the ledger node expects.
//!
//! ## Architecture
//!
//! - **crypto**: Ed25519, SHA-256, AES-256-GCM, Argon2id. Thin wrappers only.
//! - **identity**: BIP-39 phrases, hex addresses, lifecycle state.
//! - **policy**: Password strength scoring for the create-wallet gate.
//! - **vault**: The encrypted wallet record and its persistence.
//! - **session**: Time-boxed unlock, clock and ticker seams.
//! - **transaction**: Canonical signing payload, builder, signer.
//! - **ledger**: Async boundary to the node: account lookup and submit.
//! - **storage**: String key-value stores (in-memory and sled).
//! - **facade**: [`WalletFacade`], the single entry point.
//! - **config**: Constants and [`WalletConfig`].
//!
//! ## Ground Rules
//!
//! 1. The signing payload layout never changes. One byte off and every
//!    transfer bounces.
//! 2. Secrets are wrapped in `Zeroizing` and never reach a log line.
//! 3. A failed password check changes nothing, anywhere.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use keel_wallet::{MemoryStore, WalletFacade};
//!
//! let wallet = WalletFacade::new(Arc::new(MemoryStore::new()));
//! let created = wallet.create_wallet("Xk9$mQ2vWp!7").unwrap();
//! assert_eq!(created.mnemonic.split_whitespace().count(), 12);
//! assert!(wallet.is_unlocked());
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod facade;
pub mod identity;
pub mod ledger;
pub mod policy;
pub mod session;
pub mod storage;
pub mod transaction;
pub mod vault;

pub use config::WalletConfig;
pub use error::{WalletError, WalletResult};
pub use facade::{CreatedWallet, TransferReceipt, WalletFacade, WalletSummary};
pub use identity::{WalletState, WalletStatus};
pub use ledger::{LedgerClient, LedgerError};
pub use policy::PasswordScore;
pub use session::{Clock, ManualClock, ManualTicker, SystemClock, Ticker, TokioTicker};
pub use storage::{KeyValueStore, MemoryStore, SledStore, StorageError};
pub use transaction::{AccountInfo, Transaction, TransactionData, TransferSubmission};
