//! This crate contains the shared domain types and all fullstack server functions.

pub mod coin;
pub mod duration;
pub mod fiat_currency;
pub mod incentives;
#[cfg(not(target_arch = "wasm32"))]
mod lcd;
pub mod lock;
pub mod pool;
pub mod prefs;
#[cfg(not(target_arch = "wasm32"))]
mod price_caching;
pub mod price_map;
pub mod price_providers;
pub mod queries;
#[cfg(not(target_arch = "wasm32"))]
mod signer;
pub mod tx;

use dioxus::prelude::*;
use incentives::IncentiveSnapshot;
use incentives::IncentivizedGauge;
use lock::LockId;
use pool::PoolId;
use prefs::chain_config::ChainConfig;
use prefs::user_prefs::UserPrefs;
use price_map::PriceMap;
use queries::LockupQueries;
use tx::BroadcastAck;
use tx::TxResult;

pub type ApiError = anyhow::Error;

/// Retrieves the user's preferences.
///
/// In the future this may read from a settings file.  For now it just
/// returns the default settings, which read from env vars.
#[post("/api/get_user_prefs")]
pub async fn get_user_prefs() -> Result<UserPrefs, ApiError> {
    Ok(UserPrefs::default())
}

#[post("/api/chain_config")]
pub async fn chain_config() -> Result<ChainConfig, ApiError> {
    Ok(ChainConfig::from_env())
}

/// The address the local signer signs for, or `None` when no signer is reachable.
#[post("/api/signer_account")]
pub async fn signer_account() -> Result<Option<String>, ApiError> {
    let config = ChainConfig::from_env();
    match signer::SignerClient::new(&config.signer_url).account().await {
        Ok(address) => {
            dioxus_logger::tracing::info!("signer account: {}", address);
            Ok(Some(address))
        }
        Err(e) => {
            dioxus_logger::tracing::warn!("signer unavailable at {}: {}", config.signer_url, e);
            Ok(None)
        }
    }
}

/// Lockable durations and the locks held by `owner`.
///
/// An empty owner yields no locks.
#[post("/api/lockup_queries")]
pub async fn lockup_queries(owner: String) -> Result<LockupQueries, ApiError> {
    let lcd = lcd::LcdClient::new(&ChainConfig::from_env().lcd_url);

    if owner.is_empty() {
        return Ok(LockupQueries {
            lockable_durations: lcd.lockable_durations().await?,
            owner,
            locks: Vec::new(),
        });
    }

    let (durations, locks) = tokio::join!(lcd.lockable_durations(), lcd.account_locks(&owner));
    Ok(LockupQueries {
        lockable_durations: durations?,
        owner,
        locks: locks?,
    })
}

#[post("/api/incentivized_pools")]
pub async fn incentivized_pools() -> Result<Vec<IncentivizedGauge>, ApiError> {
    lcd::LcdClient::new(&ChainConfig::from_env().lcd_url)
        .incentivized_pools()
        .await
}

#[post("/api/incentive_snapshot")]
pub async fn incentive_snapshot(pool_id: PoolId) -> Result<IncentiveSnapshot, ApiError> {
    lcd::LcdClient::new(&ChainConfig::from_env().lcd_url)
        .incentive_snapshot(pool_id)
        .await
}

#[post("/api/fiat_prices")]
pub async fn fiat_prices() -> Result<PriceMap, ApiError> {
    price_caching::get_cached_fiat_prices().await
}

/// Asks the signer to begin unlocking every lock in `lock_ids` in one transaction.
///
/// Returns once the transaction is in the mempool. A transaction that fails
/// check-tx is an error carrying the chain's log.
#[post("/api/begin_unlocking")]
pub async fn begin_unlocking(lock_ids: Vec<LockId>, memo: String) -> Result<BroadcastAck, ApiError> {
    let config = ChainConfig::from_env();
    dioxus_logger::tracing::info!("begin unlocking {} lock(s)", lock_ids.len());

    let ack = signer::SignerClient::new(&config.signer_url)
        .begin_unlocking(&config.chain_id, &lock_ids, &memo)
        .await?;

    dioxus_logger::tracing::info!("broadcast tx {}", ack.hash);
    Ok(ack)
}

/// The delivered result of a transaction, `None` while it is not yet in a block.
#[post("/api/tx_result")]
pub async fn tx_result(hash: String) -> Result<Option<TxResult>, ApiError> {
    lcd::LcdClient::new(&ChainConfig::from_env().lcd_url)
        .tx_result(&hash)
        .await
}
