//! # Wallet Facade
//!
//! The one type the UI and the CLI talk to. It owns the encrypted record
//! and the session, and is the only place that moves a secret from one to
//! the other.
//!
//! ## Flows
//!
//! ```text
//! create_wallet ─▶ policy gate ─▶ new phrase ─▶ seal ─▶ save ─▶ start session
//! import_wallet ─▶ parse phrase ─────────────▶ seal ─▶ save ─▶ start session
//! unlock        ─▶ load ─▶ open (password) ─────────────────▶ start session
//! build_and_sign ─▶ live session? ─▶ build ─▶ sign ─▶ self-verify
//! send_transfer  ─▶ fetch nonce ─▶ build_and_sign ─▶ submit once
//! ```
//!
//! Every password check is a probe: a wrong password returns
//! [`WalletError::InvalidPassword`] and leaves both the record and the
//! session exactly as they were.

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::config::{WalletConfig, AUTO_LOCK_POLL_INTERVAL};
use crate::crypto::keys::WalletKeypair;
use crate::error::{WalletError, WalletResult};
use crate::identity::address::parse_address;
use crate::identity::mnemonic;
use crate::identity::state::WalletState;
use crate::ledger::LedgerClient;
use crate::policy;
use crate::session::{Clock, SessionManager, SystemClock, Ticker};
use crate::storage::KeyValueStore;
use crate::transaction::signing::{ensure_verifies, sign_transaction};
use crate::transaction::{Transaction, TransactionBuilder};
use crate::vault::{EncryptedKeyStore, StoredWalletRecord};

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Public identity of the stored wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub address: String,
    pub public_key: String,
}

impl WalletSummary {
    fn of(record: &StoredWalletRecord) -> Self {
        Self {
            address: record.address.clone(),
            public_key: record.public_key.clone(),
        }
    }
}

/// A newly created wallet. The phrase is shown to the user once and then
/// only comes back through [`WalletFacade::export_mnemonic`].
pub struct CreatedWallet {
    pub summary: WalletSummary,
    pub mnemonic: Zeroizing<String>,
}

impl fmt::Debug for CreatedWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatedWallet")
            .field("summary", &self.summary)
            .field("mnemonic", &"<redacted>")
            .finish()
    }
}

/// A transfer the ledger accepted for processing.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub transaction: Transaction,
    /// Response body from the ledger, verbatim.
    pub response: String,
}

// ---------------------------------------------------------------------------
// WalletFacade
// ---------------------------------------------------------------------------

pub struct WalletFacade {
    keystore: EncryptedKeyStore,
    session: SessionManager,
    clock: Arc<dyn Clock>,
    config: WalletConfig,
}

impl WalletFacade {
    /// Facade over `store` with the system clock and default settings.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(store, Arc::new(SystemClock), WalletConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        config: WalletConfig,
    ) -> Self {
        let session = SessionManager::new(store.clone(), clock.clone(), config.session_duration);
        Self {
            keystore: EncryptedKeyStore::new(store),
            session,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    // -- Lifecycle -----------------------------------------------------------

    /// Generate a new wallet sealed under `password` and unlock it.
    ///
    /// Refuses passwords that don't score 4/4. Replaces any existing
    /// wallet.
    pub fn create_wallet(&self, password: &str) -> WalletResult<CreatedWallet> {
        let strength = policy::score(password);
        if !strength.is_strong {
            return Err(WalletError::WeakPassword {
                score: strength.score,
                feedback: strength.feedback,
            });
        }

        let identity = mnemonic::generate()?;
        let record = self.install(&identity.keypair, &identity.phrase, password)?;

        info!(address = %record.address, "wallet created");
        Ok(CreatedWallet {
            summary: WalletSummary::of(&record),
            mnemonic: identity.phrase,
        })
    }

    /// Restore a wallet from its recovery phrase and unlock it. Replaces
    /// any existing wallet.
    pub fn import_wallet(&self, phrase: &str, password: &str) -> WalletResult<WalletSummary> {
        require_non_empty(password)?;

        let normalized = mnemonic::normalize(phrase)?;
        let keypair = mnemonic::derive(&normalized)?;
        let record = self.install(&keypair, &normalized, password)?;

        info!(address = %record.address, "wallet imported");
        Ok(WalletSummary::of(&record))
    }

    /// Decrypt the stored key and start a session.
    pub fn unlock(&self, password: &str) -> WalletResult<WalletSummary> {
        let record = self.keystore.require()?;
        let keypair = record.open_keypair(password).map_err(|e| {
            warn!(address = %record.address, error = %e, "unlock failed");
            e
        })?;

        let expires_at = self.session.start(&keypair.secret_key_hex())?;
        info!(address = %record.address, %expires_at, "wallet unlocked");
        Ok(WalletSummary::of(&record))
    }

    /// End the session. The record is untouched.
    pub fn lock(&self) -> WalletResult<()> {
        self.session.end()?;
        info!("wallet locked");
        Ok(())
    }

    /// Remove the session and the record. Without a backed-up phrase the
    /// key is gone for good.
    pub fn delete_wallet(&self) -> WalletResult<()> {
        self.keystore.delete()?;
        info!("wallet deleted");
        Ok(())
    }

    /// Re-seal the record under `new_password`.
    ///
    /// The old password is checked first; on failure nothing is written.
    /// A live session stays live, since the key itself doesn't change.
    pub fn change_password(&self, old_password: &str, new_password: &str) -> WalletResult<()> {
        require_non_empty(new_password)?;

        let record = self.keystore.require()?;
        let resealed = record
            .reseal(old_password, new_password, &self.config.kdf)
            .map_err(|e| {
                warn!(error = %e, "password change refused");
                e
            })?;
        self.keystore.save(&resealed)?;

        info!(address = %record.address, "wallet password changed");
        Ok(())
    }

    // -- Secret export -------------------------------------------------------

    /// Reveal the recovery phrase. Needs a live session and the password.
    pub fn export_mnemonic(&self, password: &str) -> WalletResult<Zeroizing<String>> {
        let record = self.keystore.require()?;
        self.unlocked_keypair(&record)?;
        let phrase = record.open_mnemonic(password)?;
        info!(address = %record.address, "mnemonic exported");
        Ok(phrase)
    }

    /// Reveal the hex private key. Needs a live session and the password.
    pub fn export_private_key(&self, password: &str) -> WalletResult<Zeroizing<String>> {
        let record = self.keystore.require()?;
        self.unlocked_keypair(&record)?;
        let keypair = record.open_keypair(password)?;
        info!(address = %record.address, "private key exported");
        Ok(keypair.secret_key_hex())
    }

    // -- Signing -------------------------------------------------------------

    /// Build a native transfer from the wallet to `receiver` and sign it.
    ///
    /// `nonce` must be the sender account's next expected nonce. The
    /// signature is verified against the stored public key before the
    /// transaction is returned.
    pub fn build_and_sign_transaction(
        &self,
        receiver: &str,
        amount: u64,
        nonce: u64,
    ) -> WalletResult<Transaction> {
        let record = self.keystore.require()?;
        let keypair = self.unlocked_keypair(&record)?;
        let receiver = parse_address(receiver)?;

        let mut tx = TransactionBuilder::native_transfer(amount)
            .sender(keypair.public_key().as_bytes())
            .receiver(receiver.as_bytes())
            .nonce(nonce)
            .build()?;
        sign_transaction(&mut tx, &keypair)?;
        ensure_verifies(&tx)?;

        debug!(receiver = %tx.receiver, amount, nonce, "transfer built");
        Ok(tx)
    }

    /// Fetch the nonce, sign and submit a transfer.
    ///
    /// Submission happens at most once. Ledger failures come back as
    /// [`WalletError::Ledger`] and do not lock the wallet.
    pub async fn send_transfer(
        &self,
        client: &dyn LedgerClient,
        receiver: &str,
        amount: u64,
    ) -> WalletResult<TransferReceipt> {
        let record = self.keystore.require()?;
        // Fail on a locked wallet or a bad address before touching the network.
        self.unlocked_keypair(&record)?;
        parse_address(receiver)?;

        let account = client.fetch_account(&record.address).await?;
        debug!(balance = account.balance, nonce = account.nonce, "account fetched");

        let transaction = self.build_and_sign_transaction(receiver, amount, account.nonce)?;
        let submission = transaction
            .to_submission()
            .ok_or_else(|| WalletError::SigningError("transaction is unsigned".to_string()))?;

        let response = client.submit(&submission).await?;
        info!(
            address = %record.address,
            nonce = transaction.nonce,
            amount,
            "transfer submitted"
        );
        Ok(TransferReceipt {
            transaction,
            response,
        })
    }

    // -- Session -------------------------------------------------------------

    /// Where the wallet is in its lifecycle.
    ///
    /// A session without a record, or whose key doesn't match the record,
    /// is thrown away here.
    pub fn state(&self) -> WalletResult<WalletState> {
        let Some(record) = self.keystore.load()? else {
            if self.session.live_session()?.is_some() {
                warn!("discarding session with no stored wallet");
                self.session.end()?;
            }
            return Ok(WalletState::NoWallet);
        };

        let Some(session) = self.session.live_session()? else {
            return Ok(WalletState::Locked {
                address: record.address,
                public_key: record.public_key,
            });
        };

        let secret = session.private_key();
        match WalletKeypair::from_hex(&secret) {
            Ok(keypair) if keypair.public_key().to_hex() == record.public_key => {
                Ok(WalletState::Unlocked {
                    address: record.address,
                    public_key: record.public_key,
                    private_key: secret,
                })
            }
            _ => {
                warn!(address = %record.address, "discarding session for a different key");
                self.session.end()?;
                Ok(WalletState::Locked {
                    address: record.address,
                    public_key: record.public_key,
                })
            }
        }
    }

    /// Whether a live session exists. Observing an expired session locks.
    pub fn is_unlocked(&self) -> bool {
        self.session.is_unlocked()
    }

    /// Expiry of the live session, if any.
    pub fn session_expires_at(&self) -> WalletResult<Option<DateTime<Utc>>> {
        self.session.expires_at()
    }

    /// Record user activity. Extends a live session; a locked wallet stays
    /// locked. Returns whether the session was extended.
    pub fn touch(&self) -> WalletResult<bool> {
        self.session.refresh()
    }

    /// Poll the session on `ticker` so an idle wallet locks itself.
    pub fn start_auto_lock(&self, ticker: &mut dyn Ticker) {
        let session = self.session.clone();
        ticker.every(
            AUTO_LOCK_POLL_INTERVAL,
            Box::new(move || {
                let _ = session.is_unlocked();
            }),
        );
        debug!(period = ?AUTO_LOCK_POLL_INTERVAL, "auto-lock scheduled");
    }

    // -- Internals -----------------------------------------------------------

    /// Seal and persist `keypair`, replacing any wallet, then unlock it.
    fn install(
        &self,
        keypair: &WalletKeypair,
        phrase: &str,
        password: &str,
    ) -> WalletResult<StoredWalletRecord> {
        let record = StoredWalletRecord::seal(
            keypair,
            Some(phrase),
            password,
            &self.config.kdf,
            self.clock.now(),
        )?;

        // Old session first, so the previous key never sits next to the new record.
        self.session.end()?;
        self.keystore.save(&record)?;
        self.session.start(&keypair.secret_key_hex())?;
        Ok(record)
    }

    /// The session's keypair, checked against the stored public key.
    ///
    /// A session holding some other key, or an unparseable one, is ended
    /// and reported as locked.
    fn unlocked_keypair(&self, record: &StoredWalletRecord) -> WalletResult<WalletKeypair> {
        let secret = self.session.unlocked_secret()?;
        match WalletKeypair::from_hex(&secret) {
            Ok(keypair) if keypair.public_key().to_hex() == record.public_key => Ok(keypair),
            _ => {
                warn!(address = %record.address, "session key does not match wallet, locking");
                self.session.end()?;
                Err(WalletError::WalletLocked)
            }
        }
    }
}

fn require_non_empty(password: &str) -> WalletResult<()> {
    if password.is_empty() {
        return Err(WalletError::WeakPassword {
            score: 0,
            feedback: vec!["Password must not be empty".to_string()],
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SESSION_STORAGE_KEY, WALLET_STORAGE_KEY};
    use crate::crypto::kdf::KdfParams;
    use crate::session::{ManualClock, ManualTicker};
    use crate::storage::MemoryStore;
    use crate::transaction::verify_transaction;
    use chrono::Duration as ChronoDuration;
    use std::time::Duration;

    const PASSWORD: &str = "Xk9$mQ2vWp!7";
    const PHRASE: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const PHRASE_ADDRESS: &str =
        "c5785e1865b708938aff8161d573006496663b1aa10834e396dc566869a2c66a";
    const RECEIVER: &str = "0000000000000000000000000000000000000000000000000000000000000002";

    struct Harness {
        store: Arc<MemoryStore>,
        clock: Arc<ManualClock>,
        wallet: WalletFacade,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::starting_now());
        let config = WalletConfig::default()
            .with_kdf(KdfParams::light())
            .with_session_duration(Duration::from_secs(30 * 60));
        let wallet = WalletFacade::with_config(store.clone(), clock.clone(), config);
        Harness {
            store,
            clock,
            wallet,
        }
    }

    #[test]
    fn test_create_unlocks_and_returns_phrase() {
        let h = harness();
        let created = h.wallet.create_wallet(PASSWORD).unwrap();

        assert_eq!(created.mnemonic.split_whitespace().count(), 12);
        assert_eq!(created.summary.address.len(), 64);
        assert!(h.wallet.is_unlocked());
        assert!(!format!("{created:?}").contains(created.mnemonic.as_str()));
    }

    #[test]
    fn test_create_rejects_weak_password() {
        let h = harness();
        let err = h.wallet.create_wallet("password123").unwrap_err();
        assert!(matches!(err, WalletError::WeakPassword { score: 0, .. }));
        assert!(h.store.is_empty());
    }

    #[test]
    fn test_import_known_phrase() {
        let h = harness();
        let summary = h.wallet.import_wallet(PHRASE, "pw").unwrap();
        assert_eq!(summary.address, PHRASE_ADDRESS);
        assert_eq!(summary.public_key, PHRASE_ADDRESS);
        assert!(h.wallet.is_unlocked());
    }

    #[test]
    fn test_import_bad_phrase_leaves_store_alone() {
        let h = harness();
        let err = h
            .wallet
            .import_wallet("abandon abandon abandon", PASSWORD)
            .unwrap_err();
        assert!(matches!(err, WalletError::InvalidMnemonic(_)));
        assert!(h.store.is_empty());
    }

    #[test]
    fn test_import_rejects_empty_password() {
        let h = harness();
        assert!(matches!(
            h.wallet.import_wallet(PHRASE, ""),
            Err(WalletError::WeakPassword { .. })
        ));
    }

    #[test]
    fn test_unlock_without_wallet() {
        let h = harness();
        assert!(matches!(
            h.wallet.unlock(PASSWORD),
            Err(WalletError::NoWalletFound)
        ));
    }

    #[test]
    fn test_wrong_password_has_no_side_effects() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();
        h.wallet.lock().unwrap();
        let before = h.store.get(WALLET_STORAGE_KEY).unwrap();

        assert!(matches!(
            h.wallet.unlock("wrong"),
            Err(WalletError::InvalidPassword)
        ));
        assert!(!h.wallet.is_unlocked());
        assert!(h.store.get(SESSION_STORAGE_KEY).unwrap().is_none());
        assert_eq!(h.store.get(WALLET_STORAGE_KEY).unwrap(), before);
    }

    #[test]
    fn test_lock_then_unlock() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();
        h.wallet.lock().unwrap();
        assert!(!h.wallet.is_unlocked());

        let summary = h.wallet.unlock(PASSWORD).unwrap();
        assert_eq!(summary.address, PHRASE_ADDRESS);
        assert!(h.wallet.is_unlocked());
    }

    #[test]
    fn test_sign_requires_live_session() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();
        h.wallet.lock().unwrap();
        assert!(matches!(
            h.wallet.build_and_sign_transaction(RECEIVER, 100, 1),
            Err(WalletError::WalletLocked)
        ));
    }

    #[test]
    fn test_signed_transaction_verifies() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();

        let tx = h.wallet.build_and_sign_transaction(RECEIVER, 100, 1).unwrap();
        assert!(verify_transaction(&tx));
        assert_eq!(tx.sender.to_hex(), PHRASE_ADDRESS);
        assert_eq!(tx.receiver.to_hex(), RECEIVER);
        assert_eq!(tx.amount(), 100);
    }

    #[test]
    fn test_sign_rejects_bad_receiver() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();
        assert!(matches!(
            h.wallet.build_and_sign_transaction("xyz", 1, 1),
            Err(WalletError::InvalidAddress(_))
        ));
        assert!(matches!(
            h.wallet.build_and_sign_transaction("abcd", 1, 1),
            Err(WalletError::InvalidFieldLength { .. })
        ));
    }

    #[test]
    fn test_session_expires_after_duration() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();

        h.clock.advance(ChronoDuration::minutes(30));
        assert!(!h.wallet.is_unlocked());
        assert!(matches!(
            h.wallet.build_and_sign_transaction(RECEIVER, 1, 1),
            Err(WalletError::WalletLocked)
        ));
    }

    #[test]
    fn test_touch_extends_only_live_sessions() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();

        h.clock.advance(ChronoDuration::minutes(29));
        assert!(h.wallet.touch().unwrap());
        h.clock.advance(ChronoDuration::minutes(29));
        assert!(h.wallet.is_unlocked());

        h.clock.advance(ChronoDuration::minutes(2));
        assert!(!h.wallet.touch().unwrap());
        assert!(!h.wallet.is_unlocked());
    }

    #[test]
    fn test_auto_lock_tick_removes_expired_session() {
        let h = harness();
        let mut ticker = ManualTicker::new();
        h.wallet.start_auto_lock(&mut ticker);
        assert_eq!(ticker.periods(), vec![AUTO_LOCK_POLL_INTERVAL]);

        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();
        ticker.fire();
        assert!(h.store.get(SESSION_STORAGE_KEY).unwrap().is_some());

        h.clock.advance(ChronoDuration::minutes(31));
        ticker.fire();
        assert!(h.store.get(SESSION_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_change_password() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();

        h.wallet.change_password(PASSWORD, "new-secret").unwrap();
        assert!(h.wallet.is_unlocked(), "live session survives");

        h.wallet.lock().unwrap();
        assert!(matches!(
            h.wallet.unlock(PASSWORD),
            Err(WalletError::InvalidPassword)
        ));
        assert!(h.wallet.unlock("new-secret").is_ok());
    }

    #[test]
    fn test_change_password_with_wrong_old_password() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();
        let before = h.store.get(WALLET_STORAGE_KEY).unwrap();

        assert!(matches!(
            h.wallet.change_password("wrong", "new-secret"),
            Err(WalletError::InvalidPassword)
        ));
        assert_eq!(h.store.get(WALLET_STORAGE_KEY).unwrap(), before);
    }

    #[test]
    fn test_export_secrets() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();

        assert_eq!(h.wallet.export_mnemonic(PASSWORD).unwrap().as_str(), PHRASE);
        assert_eq!(
            h.wallet.export_private_key(PASSWORD).unwrap().as_str(),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1"
        );
        assert!(matches!(
            h.wallet.export_mnemonic("wrong"),
            Err(WalletError::InvalidPassword)
        ));
    }

    #[test]
    fn test_export_requires_live_session() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();
        h.wallet.lock().unwrap();
        assert!(matches!(
            h.wallet.export_mnemonic(PASSWORD),
            Err(WalletError::WalletLocked)
        ));
        assert!(matches!(
            h.wallet.export_private_key(PASSWORD),
            Err(WalletError::WalletLocked)
        ));
    }

    #[test]
    fn test_export_mnemonic_unavailable_for_legacy_record() {
        let h = harness();
        let kp = mnemonic::derive(PHRASE).unwrap();
        let record =
            StoredWalletRecord::seal(&kp, None, PASSWORD, &KdfParams::light(), Utc::now()).unwrap();
        EncryptedKeyStore::new(h.store.clone()).save(&record).unwrap();
        h.wallet.unlock(PASSWORD).unwrap();

        assert!(matches!(
            h.wallet.export_mnemonic(PASSWORD),
            Err(WalletError::MnemonicUnavailable)
        ));
        assert!(h.wallet.build_and_sign_transaction(RECEIVER, 1, 1).is_ok());
    }

    #[test]
    fn test_delete_wallet() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();
        h.wallet.delete_wallet().unwrap();

        assert!(h.store.is_empty());
        assert_eq!(h.wallet.state().unwrap(), WalletState::NoWallet);
        assert!(matches!(
            h.wallet.unlock(PASSWORD),
            Err(WalletError::NoWalletFound)
        ));
    }

    #[test]
    fn test_state_transitions() {
        let h = harness();
        assert_eq!(h.wallet.state().unwrap(), WalletState::NoWallet);

        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();
        let state = h.wallet.state().unwrap();
        assert!(state.is_unlocked());
        assert_eq!(state.address(), Some(PHRASE_ADDRESS));

        h.wallet.lock().unwrap();
        assert!(matches!(
            h.wallet.state().unwrap(),
            WalletState::Locked { .. }
        ));
    }

    #[test]
    fn test_foreign_session_is_discarded() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();

        let stranger = WalletKeypair::generate();
        SessionManager::new(
            h.store.clone(),
            h.clock.clone(),
            Duration::from_secs(60),
        )
        .start(&stranger.secret_key_hex())
        .unwrap();

        assert!(matches!(
            h.wallet.state().unwrap(),
            WalletState::Locked { .. }
        ));
        assert!(h.store.get(SESSION_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_unparseable_session_key_locks() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();

        SessionManager::new(
            h.store.clone(),
            h.clock.clone(),
            Duration::from_secs(60),
        )
        .start("not-a-key")
        .unwrap();

        let err = h
            .wallet
            .build_and_sign_transaction(RECEIVER, 1, 0)
            .unwrap_err();
        assert!(matches!(err, WalletError::WalletLocked));
        assert!(h.store.get(SESSION_STORAGE_KEY).unwrap().is_none());
        assert!(matches!(
            h.wallet.export_private_key(PASSWORD),
            Err(WalletError::WalletLocked)
        ));
    }

    #[test]
    fn test_orphan_session_is_discarded() {
        let h = harness();
        h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();
        h.store.delete(WALLET_STORAGE_KEY).unwrap();

        assert_eq!(h.wallet.state().unwrap(), WalletState::NoWallet);
        assert!(h.store.is_empty());
    }

    #[test]
    fn test_second_import_replaces_first_wallet() {
        let h = harness();
        let first = h.wallet.create_wallet(PASSWORD).unwrap();
        let second = h.wallet.import_wallet(PHRASE, PASSWORD).unwrap();

        assert_ne!(first.summary.address, second.address);
        let stored = EncryptedKeyStore::new(h.store.clone()).require().unwrap();
        assert_eq!(stored.address, PHRASE_ADDRESS);
        assert!(h.wallet.build_and_sign_transaction(RECEIVER, 1, 1).is_ok());
    }
}
