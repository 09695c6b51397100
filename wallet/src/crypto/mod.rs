//! # Cryptographic Primitives
//!
//! Every signature, digest and sealed secret in the wallet flows through
//! here. Boring, audited building blocks only:
//!
//! - **Ed25519** for signatures (`ed25519-dalek`).
//! - **SHA-256** for the transaction digest, because that's what the node
//!   recomputes.
//! - **AES-256-GCM** for secrets at rest.
//! - **Argon2id** between the password and the AES key.
//!
//! Thin, typed wrappers. No hand-rolled crypto.

pub mod encryption;
pub mod hash;
pub mod kdf;
pub mod keys;
pub mod signatures;

pub use encryption::{open_with_password, seal_with_password, EncryptionError, SealedSecret};
pub use hash::sha256;
pub use kdf::KdfParams;
pub use keys::{KeyError, PublicKey, WalletKeypair, WalletSignature};
pub use signatures::{sign, verify, SignatureError};
