//! # HTTP Ledger Client
//!
//! [`LedgerClient`] over the ledger proxy's REST endpoints:
//!
//! | Method | Path                  | Body / Response                  |
//! |--------|-----------------------|----------------------------------|
//! | GET    | `/account/{address}`  | → `{ "balance": u64, "nonce": u64 }` |
//! | POST   | `/transactions`       | `TransferSubmission` JSON → text |
//!
//! One request per call. Nothing is retried here; the wallet decides what
//! happens after a failure.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use keel_wallet::{AccountInfo, LedgerClient, LedgerError, TransferSubmission};

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct HttpLedgerClient {
    client: Client,
    base_url: String,
}

impl HttpLedgerClient {
    pub fn new(base_url: &str) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn fetch_account(&self, address: &str) -> Result<AccountInfo, LedgerError> {
        let url = self.url(&format!("/account/{address}"));
        tracing::debug!(%url, "fetching account");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::Rejected { status, body });
        }

        response
            .json::<AccountInfo>()
            .await
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))
    }

    async fn submit(&self, submission: &TransferSubmission) -> Result<String, LedgerError> {
        let url = self.url("/transactions");
        tracing::debug!(%url, nonce = submission.nonce, "submitting transaction");

        let response = self
            .client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(LedgerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
