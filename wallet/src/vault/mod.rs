//! # Vault Module: Encrypted Key Storage
//!
//! Where the wallet's secrets rest between sessions.
//!
//! ```text
//! record.rs   StoredWalletRecord: public identity plus sealed secrets
//! keystore.rs EncryptedKeyStore: load/save/delete under a fixed key
//! ```
//!
//! Secrets are sealed with AES-256-GCM under an Argon2id-derived key (see
//! [`crate::crypto::encryption`]). The private key and the mnemonic each
//! get their own salt and nonce, so neither ciphertext helps attack the
//! other.

pub mod keystore;
pub mod record;

pub use keystore::EncryptedKeyStore;
pub use record::StoredWalletRecord;
