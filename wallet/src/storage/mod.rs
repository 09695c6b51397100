//! # Storage Module
//!
//! The wallet persists exactly two values: the encrypted wallet record and
//! the short-lived session. Both are JSON strings under fixed keys, so the
//! storage contract is a plain string key-value interface.
//!
//! ```text
//! memory.rs MemoryStore: HashMap behind a lock, for tests and ephemeral use
//! db.rs     SledStore: durable, file-backed, survives restarts
//! ```
//!
//! Writes to different keys are independent. Nothing here is transactional
//! across keys, and callers must be correct under a crash between two
//! writes (a record without a session is simply "locked").

pub mod db;
pub mod memory;

use thiserror::Error;

pub use db::SledStore;
pub use memory::MemoryStore;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("stored value under {key} is not valid UTF-8")]
    InvalidUtf8 { key: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Minimal key-value repository the vault and session manager sit on.
///
/// Implementations must be usable through a shared reference; the wallet
/// shares one store between the key store and the session manager.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, fully replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a value. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;
}
