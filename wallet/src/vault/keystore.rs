//! # Encrypted Key Store
//!
//! Reads and writes the [`StoredWalletRecord`] under its fixed storage key.
//! There is at most one wallet per store.
//!
//! Deleting a wallet also deletes the session, session first: a crash in
//! between leaves a locked wallet behind, never a live session for a
//! wallet that no longer exists.

use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::record::StoredWalletRecord;
use crate::config::{SESSION_STORAGE_KEY, WALLET_RECORD_VERSION, WALLET_STORAGE_KEY};
use crate::error::{WalletError, WalletResult};
use crate::storage::KeyValueStore;

/// Just enough of a record to decide whether we can parse the rest.
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Persistence for the encrypted wallet record.
#[derive(Clone)]
pub struct EncryptedKeyStore {
    store: Arc<dyn KeyValueStore>,
}

impl EncryptedKeyStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist `record`, replacing any existing one.
    pub fn save(&self, record: &StoredWalletRecord) -> WalletResult<()> {
        let json = serde_json::to_string(record)
            .map_err(|e| WalletError::CorruptRecord(e.to_string()))?;
        self.store.set(WALLET_STORAGE_KEY, &json)?;
        debug!(address = %record.address, "wallet record saved");
        Ok(())
    }

    /// Load the record, if there is one.
    ///
    /// Records from any other format version are refused with
    /// [`WalletError::UnsupportedRecordVersion`] rather than guessed at.
    pub fn load(&self) -> WalletResult<Option<StoredWalletRecord>> {
        let Some(json) = self.store.get(WALLET_STORAGE_KEY)? else {
            return Ok(None);
        };

        let probe: VersionProbe =
            serde_json::from_str(&json).map_err(|e| WalletError::CorruptRecord(e.to_string()))?;
        if probe.version != WALLET_RECORD_VERSION {
            return Err(WalletError::UnsupportedRecordVersion(probe.version));
        }

        let record =
            serde_json::from_str(&json).map_err(|e| WalletError::CorruptRecord(e.to_string()))?;
        Ok(Some(record))
    }

    /// Like [`load`](Self::load) but a missing record is
    /// [`WalletError::NoWalletFound`].
    pub fn require(&self) -> WalletResult<StoredWalletRecord> {
        self.load()?.ok_or(WalletError::NoWalletFound)
    }

    /// Whether a record is stored. Does not parse it.
    pub fn exists(&self) -> WalletResult<bool> {
        Ok(self.store.get(WALLET_STORAGE_KEY)?.is_some())
    }

    /// Remove the session and then the record. Idempotent.
    pub fn delete(&self) -> WalletResult<()> {
        self.store.delete(SESSION_STORAGE_KEY)?;
        self.store.delete(WALLET_STORAGE_KEY)?;
        info!("wallet record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::KdfParams;
    use crate::crypto::keys::WalletKeypair;
    use crate::storage::MemoryStore;
    use chrono::Utc;

    fn keystore() -> (Arc<MemoryStore>, EncryptedKeyStore) {
        let store = Arc::new(MemoryStore::new());
        let keystore = EncryptedKeyStore::new(store.clone());
        (store, keystore)
    }

    fn record() -> StoredWalletRecord {
        StoredWalletRecord::seal(
            &WalletKeypair::generate(),
            None,
            "pw",
            &KdfParams::light(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_store_has_no_record() {
        let (_, ks) = keystore();
        assert!(ks.load().unwrap().is_none());
        assert!(!ks.exists().unwrap());
        assert!(matches!(ks.require(), Err(WalletError::NoWalletFound)));
    }

    #[test]
    fn test_save_then_load() {
        let (_, ks) = keystore();
        let rec = record();
        ks.save(&rec).unwrap();

        assert!(ks.exists().unwrap());
        assert_eq!(ks.load().unwrap().unwrap(), rec);
    }

    #[test]
    fn test_save_overwrites() {
        let (_, ks) = keystore();
        ks.save(&record()).unwrap();
        let second = record();
        ks.save(&second).unwrap();
        assert_eq!(ks.require().unwrap().address, second.address);
    }

    #[test]
    fn test_delete_removes_record_and_session() {
        let (store, ks) = keystore();
        ks.save(&record()).unwrap();
        store.set(SESSION_STORAGE_KEY, "{}").unwrap();

        ks.delete().unwrap();
        assert!(store.is_empty());
        ks.delete().unwrap();
    }

    #[test]
    fn test_old_version_is_unsupported() {
        let (store, ks) = keystore();
        store
            .set(WALLET_STORAGE_KEY, r#"{"version":1,"address":"aa"}"#)
            .unwrap();
        assert!(matches!(
            ks.load(),
            Err(WalletError::UnsupportedRecordVersion(1))
        ));
        assert!(ks.exists().unwrap());
    }

    #[test]
    fn test_garbage_is_corrupt() {
        let (store, ks) = keystore();
        store.set(WALLET_STORAGE_KEY, "not json").unwrap();
        assert!(matches!(ks.load(), Err(WalletError::CorruptRecord(_))));
    }

    #[test]
    fn test_truncated_v2_record_is_corrupt() {
        let (store, ks) = keystore();
        store
            .set(WALLET_STORAGE_KEY, r#"{"version":2,"address":"aa"}"#)
            .unwrap();
        assert!(matches!(ks.load(), Err(WalletError::CorruptRecord(_))));
    }
}
