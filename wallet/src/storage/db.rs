//! # SledStore: Durable Wallet Storage
//!
//! A [`KeyValueStore`] on top of sled's embedded key-value store. All
//! wallet data lands in a single named tree:
//!
//! | Tree     | Key (UTF-8)    | Value (UTF-8 JSON)        |
//! |----------|----------------|---------------------------|
//! | `wallet` | `keel.wallet`  | `StoredWalletRecord`      |
//! | `wallet` | `keel.session` | `Session`                 |
//!
//! Every write is flushed before returning. There are two keys and they
//! change only on user action, so durability beats throughput here.

use sled::{Db, Tree};
use std::path::Path;

use super::{KeyValueStore, StorageError, StorageResult};

/// Name of the sled tree holding wallet data.
const WALLET_TREE: &str = "wallet";

/// Persistent [`KeyValueStore`].
///
/// sled is thread-safe; clones share the same underlying database.
#[derive(Debug, Clone)]
pub struct SledStore {
    db: Db,
    tree: Tree,
}

impl SledStore {
    /// Open or create a store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// A store that lives in a temp location and vanishes on drop.
    pub fn open_temporary() -> StorageResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> StorageResult<Self> {
        let tree = db.open_tree(WALLET_TREE)?;
        Ok(Self { db, tree })
    }

    /// Force everything to disk.
    pub fn flush(&self) -> StorageResult<()> {
        self.db.flush()?;
        Ok(())
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self.tree.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|_| StorageError::InvalidUtf8 {
                    key: key.to_string(),
                }),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.tree.insert(key.as_bytes(), value.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.tree.remove(key.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_temporary_store() {
        let store = SledStore::open_temporary().expect("should create temp store");
        assert!(store.get("keel.wallet").unwrap().is_none());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let store = SledStore::open(dir.path()).expect("should open store");
            store.set("keel.wallet", "{\"version\":2}").unwrap();
        }

        let reopened = SledStore::open(dir.path()).expect("should reopen store");
        assert_eq!(
            reopened.get("keel.wallet").unwrap().as_deref(),
            Some("{\"version\":2}")
        );
    }

    #[test]
    fn set_overwrites_and_delete_removes() {
        let store = SledStore::open_temporary().unwrap();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

        store.delete("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
        store.delete("k").unwrap();
    }

    #[test]
    fn clones_share_data() {
        let store = SledStore::open_temporary().unwrap();
        let clone = store.clone();
        store.set("shared", "yes").unwrap();
        assert_eq!(clone.get("shared").unwrap().as_deref(), Some("yes"));
    }
}
