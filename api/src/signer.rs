//! Client for the local signing service that holds the user's key.
//!
//! The service signs and broadcasts (sync mode) the messages we hand it, so
//! no key material ever reaches this process.

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::lock::LockId;
use crate::tx::BroadcastAck;
use crate::ApiError;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SignerError {
    /// The transaction failed check-tx and was never broadcast.
    #[error("{log}")]
    Rejected { code: u32, log: String },
    #[error("signer returned {0}")]
    Status(u16),
}

#[derive(Deserialize, Debug)]
struct AccountResponse {
    address: String,
}

#[derive(Serialize, Debug)]
struct BeginUnlockingRequest<'a> {
    chain_id: &'a str,
    /// Lock ids as decimal strings, the way the chain encodes uint64 in JSON.
    ids: Vec<String>,
    memo: &'a str,
}

#[derive(Deserialize, Debug)]
struct BroadcastResponse {
    tx_response: BroadcastTxJson,
}

#[derive(Deserialize, Debug)]
struct BroadcastTxJson {
    txhash: String,
    #[serde(default)]
    code: u32,
    #[serde(default)]
    raw_log: String,
}

impl BroadcastTxJson {
    fn into_ack(self) -> Result<BroadcastAck, SignerError> {
        if self.code != 0 {
            return Err(SignerError::Rejected {
                code: self.code,
                log: self.raw_log,
            });
        }
        Ok(BroadcastAck { hash: self.txhash })
    }
}

#[derive(Clone, Debug)]
pub struct SignerClient {
    base_url: String,
    http: reqwest::Client,
}

impl SignerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// The bech32 address the signer signs for.
    pub async fn account(&self) -> Result<String, ApiError> {
        let resp = self
            .http
            .get(format!("{}/v1/account", self.base_url))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(SignerError::Status(resp.status().as_u16()).into());
        }
        Ok(resp.json::<AccountResponse>().await?.address)
    }

    /// Signs and broadcasts one `MsgBeginUnlocking` per lock id in a single tx.
    pub async fn begin_unlocking(
        &self,
        chain_id: &str,
        lock_ids: &[LockId],
        memo: &str,
    ) -> Result<BroadcastAck, ApiError> {
        let request = BeginUnlockingRequest {
            chain_id,
            ids: lock_ids.iter().map(LockId::to_string).collect(),
            memo,
        };
        let resp = self
            .http
            .post(format!("{}/v1/begin_unlocking", self.base_url))
            .json(&request)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(SignerError::Status(resp.status().as_u16()).into());
        }

        let broadcast = resp.json::<BroadcastResponse>().await?;
        Ok(broadcast.tx_response.into_ack()?)
    }
}
