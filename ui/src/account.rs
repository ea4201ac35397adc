//! The account that signs and broadcasts lockup messages.

use crate::compat;
use api::lock::LockId;
use api::tx::TxResult;
use api::ApiError;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use dioxus_logger::tracing::{debug, warn};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::rc::Rc;
use std::time::Duration;

/// Invoked once with the delivered result of a broadcast transaction.
pub type TxResultCallback = Box<dyn FnOnce(TxResult)>;

pub type SharedAccount = Rc<dyn AccountFacade>;

const TX_POLL_INTERVAL: Duration = Duration::from_secs(2);
const TX_POLL_ATTEMPTS: u32 = 90;

pub trait AccountFacade {
    /// Bech32 address of the account, empty when no signer is connected.
    fn bech32_address(&self) -> &str;

    fn is_ready_to_send_msgs(&self) -> bool;

    /// Submits one begin-unlocking message covering `lock_ids`.
    ///
    /// Resolves once the transaction is broadcast. `on_result` fires later,
    /// when the transaction lands in a block.
    fn send_begin_unlocking_msg(
        &self,
        lock_ids: Vec<LockId>,
        memo: String,
        on_result: TxResultCallback,
    ) -> LocalBoxFuture<'static, Result<(), ApiError>>;
}

/// An account backed by the signer service behind the server functions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignerAccount {
    address: String,
}

impl SignerAccount {
    pub fn new(address: Option<String>) -> Self {
        Self {
            address: address.unwrap_or_default(),
        }
    }
}

impl AccountFacade for SignerAccount {
    fn bech32_address(&self) -> &str {
        &self.address
    }

    fn is_ready_to_send_msgs(&self) -> bool {
        !self.address.is_empty()
    }

    fn send_begin_unlocking_msg(
        &self,
        lock_ids: Vec<LockId>,
        memo: String,
        on_result: TxResultCallback,
    ) -> LocalBoxFuture<'static, Result<(), ApiError>> {
        async move {
            let ack = api::begin_unlocking(lock_ids, memo).await?;
            // Polling must outlive whichever component asked for the unlock.
            spawn_forever(await_tx_result(ack.hash, on_result));
            Ok(())
        }
        .boxed_local()
    }
}

async fn await_tx_result(hash: String, on_result: TxResultCallback) {
    for _ in 0..TX_POLL_ATTEMPTS {
        compat::sleep(TX_POLL_INTERVAL).await;

        match api::tx_result(hash.clone()).await {
            Ok(Some(result)) => {
                debug!("tx {} delivered with code {}", hash, result.code);
                on_result(result);
                return;
            }
            Ok(None) => continue,
            Err(e) => warn!("polling tx {} failed: {}", hash, e),
        }
    }

    warn!("gave up waiting for tx {}", hash);
    on_result(TxResult {
        code: u32::MAX,
        log: format!("timed out waiting for transaction {hash}"),
        hash,
    });
}
