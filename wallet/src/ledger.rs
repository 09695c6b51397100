//! # Ledger Client
//!
//! The two calls the wallet makes to the outside world: read an account's
//! balance and next nonce, and submit a signed transfer. Transport lives
//! behind [`LedgerClient`] so the library stays free of HTTP; the CLI ships
//! a reqwest implementation.
//!
//! Submissions are fire-once. The wallet never retries a submit, because a
//! retried transfer whose first attempt actually landed would just bounce
//! off the nonce check.

use async_trait::async_trait;
use thiserror::Error;

use crate::transaction::{AccountInfo, TransferSubmission};

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The request never got a response.
    #[error("ledger unreachable: {0}")]
    Transport(String),

    /// The ledger answered and said no.
    #[error("ledger rejected request (status {status}): {body}")]
    Rejected { status: u16, body: String },

    /// The ledger answered with something we couldn't parse.
    #[error("unexpected ledger response: {0}")]
    InvalidResponse(String),
}

/// Account lookup and transaction submission.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Current balance and next expected nonce for `address` (lowercase hex).
    async fn fetch_account(&self, address: &str) -> Result<AccountInfo, LedgerError>;

    /// Submit a signed transfer. Returns the ledger's response body.
    async fn submit(&self, submission: &TransferSubmission) -> Result<String, LedgerError>;
}
