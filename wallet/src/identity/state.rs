//! The wallet as the UI sees it: nothing, locked, or unlocked.

use serde::Serialize;
use std::fmt;
use zeroize::Zeroizing;

/// Snapshot of the wallet's lifecycle state.
///
/// ```text
///  NoWallet ──create/import──▶ Unlocked ──lock/expiry──▶ Locked
///     ▲                           ▲                         │
///     │                           └──────── unlock ─────────┘
///     └────────────── delete (from any state) ──────────────┘
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum WalletState {
    NoWallet,
    Locked {
        address: String,
        public_key: String,
    },
    Unlocked {
        address: String,
        public_key: String,
        private_key: Zeroizing<String>,
    },
}

impl WalletState {
    pub fn is_unlocked(&self) -> bool {
        matches!(self, WalletState::Unlocked { .. })
    }

    pub fn has_wallet(&self) -> bool {
        !matches!(self, WalletState::NoWallet)
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            WalletState::NoWallet => None,
            WalletState::Locked { address, .. } | WalletState::Unlocked { address, .. } => {
                Some(address)
            }
        }
    }

    /// Secret-free view, safe to serialize and log.
    pub fn summary(&self) -> WalletStatus {
        WalletStatus {
            state: self.label(),
            address: self.address().map(str::to_string),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            WalletState::NoWallet => "no-wallet",
            WalletState::Locked { .. } => "locked",
            WalletState::Unlocked { .. } => "unlocked",
        }
    }
}

impl fmt::Debug for WalletState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletState::NoWallet => write!(f, "NoWallet"),
            WalletState::Locked { address, .. } => {
                f.debug_struct("Locked").field("address", address).finish()
            }
            WalletState::Unlocked { address, .. } => f
                .debug_struct("Unlocked")
                .field("address", address)
                .field("private_key", &"<redacted>")
                .finish(),
        }
    }
}

/// What `keel status` prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletStatus {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
