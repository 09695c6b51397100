//! # Identity Module
//!
//! Who the wallet is. One Ed25519 keypair per wallet, derived from a BIP-39
//! recovery phrase, and addressed by the hex of its public key.
//!
//! 1. **Mnemonic**: 12 English words, the only backup a user needs.
//! 2. **Address**: hex public key, parsed leniently from user input.
//! 3. **State**: whether there is a wallet and whether it is unlocked.
//!
//! ## Design Decisions
//!
//! - The seed uses an empty BIP-39 passphrase and no derivation path. Any
//!   other BIP-39 tool given the same words produces the same 64-byte seed,
//!   and the first 32 bytes are the Ed25519 secret.
//! - Addresses are not hashed or checksummed. They double as the public key
//!   the ledger verifies signatures against.

pub mod address;
pub mod mnemonic;
pub mod state;

pub use address::{format_address, parse_address};
pub use mnemonic::{GeneratedIdentity, MnemonicError};
pub use state::{WalletState, WalletStatus};
