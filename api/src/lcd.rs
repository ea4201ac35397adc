//! A small client for the chain's LCD (REST) endpoints.

use std::str::FromStr;

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::coin::Currency;
use crate::coin::RawCoin;
use crate::duration::BondingDuration;
use crate::duration::ParseDurationError;
use crate::incentives::DistrRecord;
use crate::incentives::IncentiveSnapshot;
use crate::incentives::IncentivizedGauge;
use crate::incentives::PoolLiquidity;
use crate::lock::LockId;
use crate::lock::PeriodLock;
use crate::pool::PoolId;
use crate::tx::TxResult;
use crate::ApiError;

/// Most fractional digits kept when reading chain decimals.
const MAX_FRACTION_DIGITS: usize = 18;
/// Significant digits a `Decimal` can hold.
const MAX_DECIMAL_DIGITS: usize = 28;

#[derive(Error, Debug)]
pub enum LcdError {
    #[error("LCD returned {status} for {path}")]
    Status { status: u16, path: String },
    #[error("invalid chain decimal: {0}")]
    InvalidDecimal(String),
    #[error("invalid integer: {0}")]
    InvalidInteger(String),
    #[error("epoch '{0}' is not known to the chain")]
    UnknownEpoch(String),
    #[error(transparent)]
    Duration(#[from] ParseDurationError),
}

/// Parses a chain `Dec`, which carries 18 fractional digits and can exceed
/// what a `Decimal` holds. Extra fractional digits are cut off.
pub fn parse_chain_dec(s: &str) -> Result<Decimal, LcdError> {
    let s = s.trim();
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    let room = MAX_DECIMAL_DIGITS.saturating_sub(whole.trim_start_matches('-').len());
    let kept = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS).min(room)];
    let normalized = if kept.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, kept)
    };
    Decimal::from_str(&normalized).map_err(|_| LcdError::InvalidDecimal(s.to_string()))
}

fn parse_u64(s: &str) -> Result<u64, LcdError> {
    s.trim()
        .parse()
        .map_err(|_| LcdError::InvalidInteger(s.to_string()))
}

// --- Response shapes ---

#[derive(Deserialize, Debug)]
struct LockableDurationsResponse {
    lockable_durations: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct AccountLocksResponse {
    locks: Vec<LockJson>,
}

#[derive(Deserialize, Debug)]
struct LockJson {
    #[serde(rename = "ID")]
    id: String,
    owner: String,
    duration: String,
    end_time: Option<chrono::DateTime<chrono::Utc>>,
    coins: Vec<RawCoin>,
}

impl TryFrom<LockJson> for PeriodLock {
    type Error = LcdError;

    fn try_from(lock: LockJson) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LockId(parse_u64(&lock.id)?),
            owner: lock.owner,
            duration: lock.duration.parse()?,
            end_time: lock.end_time,
            coins: lock.coins,
        })
    }
}

#[derive(Deserialize, Debug)]
struct IncentivizedPoolsResponse {
    incentivized_pools: Vec<IncentivizedPoolJson>,
}

#[derive(Deserialize, Debug)]
struct IncentivizedPoolJson {
    pool_id: String,
    lockable_duration: String,
    gauge_id: String,
}

#[derive(Deserialize, Debug)]
struct DistrInfoResponse {
    distr_info: DistrInfoJson,
}

#[derive(Deserialize, Debug)]
struct DistrInfoJson {
    total_weight: String,
    records: Vec<DistrRecordJson>,
}

#[derive(Deserialize, Debug)]
struct DistrRecordJson {
    gauge_id: String,
    weight: String,
}

#[derive(Deserialize, Debug)]
struct EpochProvisionsResponse {
    epoch_provisions: String,
}

#[derive(Deserialize, Debug)]
struct MintParamsResponse {
    params: MintParamsJson,
}

#[derive(Deserialize, Debug)]
struct MintParamsJson {
    mint_denom: String,
    epoch_identifier: String,
    distribution_proportions: DistributionProportionsJson,
}

#[derive(Deserialize, Debug)]
struct DistributionProportionsJson {
    pool_incentives: String,
}

#[derive(Deserialize, Debug)]
struct EpochsResponse {
    epochs: Vec<EpochJson>,
}

#[derive(Deserialize, Debug)]
struct EpochJson {
    identifier: String,
    duration: String,
}

#[derive(Deserialize, Debug)]
struct PoolResponse {
    pool: PoolJson,
}

#[derive(Deserialize, Debug)]
struct PoolJson {
    id: String,
    #[serde(default)]
    pool_assets: Vec<PoolAssetJson>,
    #[serde(default)]
    total_weight: Option<String>,
}

#[derive(Deserialize, Debug)]
struct PoolAssetJson {
    token: RawCoin,
    weight: String,
}

#[derive(Deserialize, Debug)]
struct TxResponse {
    tx_response: TxResponseJson,
}

#[derive(Deserialize, Debug)]
struct TxResponseJson {
    txhash: String,
    #[serde(default)]
    code: u32,
    #[serde(default)]
    raw_log: String,
}

fn pool_liquidity(pool: PoolJson, mint_denom: &str) -> Result<Option<PoolLiquidity>, LcdError> {
    let Some(mint_asset) = pool.pool_assets.iter().find(|a| a.token.denom == mint_denom) else {
        return Ok(None);
    };
    let Some(total_weight) = pool.total_weight.as_deref() else {
        return Ok(None);
    };

    Ok(Some(PoolLiquidity {
        pool_id: PoolId(parse_u64(&pool.id)?),
        mint_amount: parse_chain_dec(&mint_asset.token.amount)?,
        mint_weight: parse_chain_dec(&mint_asset.weight)?,
        total_weight: parse_chain_dec(total_weight)?,
    }))
}

/// Reads chain state over REST.
#[derive(Clone, Debug)]
pub struct LcdClient {
    base_url: String,
    http: reqwest::Client,
}

impl LcdClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// GETs `path` and decodes the body. `Ok(None)` on 404.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        dioxus_logger::tracing::debug!("GET {}", url);

        let resp = self.http.get(&url).send().await?;
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(resp.json::<T>().await?)),
            status => Err(LcdError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            }
            .into()),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_optional(path).await?.ok_or_else(|| {
            LcdError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                path: path.to_string(),
            }
            .into()
        })
    }

    pub async fn lockable_durations(&self) -> Result<Vec<BondingDuration>, ApiError> {
        let resp: LockableDurationsResponse = self
            .get("/osmosis/pool-incentives/v1beta1/lockable_durations")
            .await?;
        Ok(resp
            .lockable_durations
            .iter()
            .map(|d| d.parse())
            .collect::<Result<_, ParseDurationError>>()?)
    }

    pub async fn account_locks(&self, owner: &str) -> Result<Vec<PeriodLock>, ApiError> {
        let resp: AccountLocksResponse = self
            .get(&format!(
                "/osmosis/lockup/v1beta1/account_locked_longer_duration/{}",
                owner
            ))
            .await?;
        Ok(resp
            .locks
            .into_iter()
            .map(PeriodLock::try_from)
            .collect::<Result<_, LcdError>>()?)
    }

    pub async fn incentivized_pools(&self) -> Result<Vec<IncentivizedGauge>, ApiError> {
        let resp: IncentivizedPoolsResponse = self
            .get("/osmosis/pool-incentives/v1beta1/incentivized_pools")
            .await?;
        let gauges = resp
            .incentivized_pools
            .into_iter()
            .map(|p| -> Result<IncentivizedGauge, LcdError> {
                Ok(IncentivizedGauge {
                    pool_id: PoolId(parse_u64(&p.pool_id)?),
                    lockable_duration: p.lockable_duration.parse()?,
                    gauge_id: parse_u64(&p.gauge_id)?,
                })
            })
            .collect::<Result<_, LcdError>>()?;
        Ok(gauges)
    }

    async fn distr_info(&self) -> Result<(Decimal, Vec<DistrRecord>), ApiError> {
        let resp: DistrInfoResponse = self
            .get("/osmosis/pool-incentives/v1beta1/distr_info")
            .await?;
        let records = resp
            .distr_info
            .records
            .iter()
            .map(|r| -> Result<DistrRecord, LcdError> {
                Ok(DistrRecord {
                    gauge_id: parse_u64(&r.gauge_id)?,
                    weight: parse_chain_dec(&r.weight)?,
                })
            })
            .collect::<Result<_, LcdError>>()?;
        Ok((parse_chain_dec(&resp.distr_info.total_weight)?, records))
    }

    async fn epoch_provisions(&self) -> Result<Decimal, ApiError> {
        let resp: EpochProvisionsResponse =
            self.get("/osmosis/mint/v1beta1/epoch_provisions").await?;
        Ok(parse_chain_dec(&resp.epoch_provisions)?)
    }

    async fn mint_params(&self) -> Result<MintParamsJson, ApiError> {
        let resp: MintParamsResponse = self.get("/osmosis/mint/v1beta1/params").await?;
        Ok(resp.params)
    }

    async fn epochs(&self) -> Result<Vec<EpochJson>, ApiError> {
        let resp: EpochsResponse = self.get("/osmosis/epochs/v1beta1/epochs").await?;
        Ok(resp.epochs)
    }

    async fn pool(&self, pool_id: PoolId) -> Result<Option<PoolJson>, ApiError> {
        let resp: Option<PoolResponse> = self
            .get_optional(&format!("/osmosis/gamm/v1beta1/pools/{}", pool_id))
            .await?;
        Ok(resp.map(|r| r.pool))
    }

    /// Gathers the incentive inputs for one pool.
    pub async fn incentive_snapshot(&self, pool_id: PoolId) -> Result<IncentiveSnapshot, ApiError> {
        let (provisions, params, epochs, distr, gauges, durations, pool) = tokio::join!(
            self.epoch_provisions(),
            self.mint_params(),
            self.epochs(),
            self.distr_info(),
            self.incentivized_pools(),
            self.lockable_durations(),
            self.pool(pool_id),
        );
        let params = params?;
        let (distr_total_weight, distr_records) = distr?;

        let epoch_duration = epochs?
            .into_iter()
            .find(|e| e.identifier == params.epoch_identifier)
            .ok_or_else(|| LcdError::UnknownEpoch(params.epoch_identifier.clone()))?
            .duration
            .parse::<BondingDuration>()
            .map_err(LcdError::from)?;

        let pools = match pool? {
            Some(pool) => pool_liquidity(pool, &params.mint_denom)?.into_iter().collect(),
            None => Vec::new(),
        };

        let mint_currency = if params.mint_denom == Currency::osmo().coin_minimal_denom {
            Currency::osmo()
        } else {
            Currency::new(&params.mint_denom.to_uppercase(), &params.mint_denom, 6)
        };

        Ok(IncentiveSnapshot {
            mint_currency,
            epoch_provisions: provisions?,
            epoch_duration,
            pool_incentives_proportion: parse_chain_dec(
                &params.distribution_proportions.pool_incentives,
            )?,
            distr_total_weight,
            distr_records,
            incentivized_pools: gauges?,
            lockable_durations: durations?,
            pools,
        })
    }

    /// The delivered result of a transaction, or `None` until it is indexed.
    pub async fn tx_result(&self, hash: &str) -> Result<Option<TxResult>, ApiError> {
        let resp: Option<TxResponse> = self
            .get_optional(&format!("/cosmos/tx/v1beta1/txs/{}", hash))
            .await?;
        Ok(resp.map(|r| TxResult {
            code: r.tx_response.code,
            log: r.tx_response.raw_log,
            hash: r.tx_response.txhash,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_decimals_are_cut_to_fit() {
        assert_eq!(
            parse_chain_dec("821917808219.178082191780821917").unwrap(),
            Decimal::from_str("821917808219.1780821917808219").unwrap()
        );
        assert_eq!(
            parse_chain_dec("0.450000000000000000").unwrap(),
            Decimal::from_str("0.45").unwrap()
        );
        assert_eq!(parse_chain_dec("1000").unwrap(), Decimal::from(1000));
        assert!(parse_chain_dec("abc").is_err());
    }

    #[test]
    fn decodes_account_locks() {
        let json = r#"{"locks":[
            {"ID":"42","owner":"osmo1abc","duration":"1209600s","end_time":"0001-01-01T00:00:00Z",
             "coins":[{"denom":"gamm/pool/1","amount":"5000000000000000000"}]},
            {"ID":"43","owner":"osmo1abc","duration":"86400s","end_time":"2021-08-01T00:00:00Z",
             "coins":[{"denom":"gamm/pool/1","amount":"1"}]}
        ]}"#;
        let resp: AccountLocksResponse = serde_json::from_str(json).unwrap();
        let locks: Vec<PeriodLock> = resp
            .locks
            .into_iter()
            .map(PeriodLock::try_from)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(locks[0].id, LockId(42));
        assert_eq!(locks[0].duration, BondingDuration::from_days(14));
        assert!(!locks[0].is_unbonding());
        assert!(locks[1].is_unbonding());
    }

    #[test]
    fn values_pool_from_mint_asset() {
        let json = r#"{"pool":{"@type":"/osmosis.gamm.v1beta1.Pool","id":"1",
            "pool_assets":[
                {"token":{"denom":"ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2","amount":"100"},"weight":"536870912000000"},
                {"token":{"denom":"uosmo","amount":"2000000"},"weight":"536870912000000"}
            ],
            "total_weight":"1073741824000000"}}"#;
        let resp: PoolResponse = serde_json::from_str(json).unwrap();
        let liquidity = pool_liquidity(resp.pool, "uosmo").unwrap().unwrap();

        assert_eq!(liquidity.pool_id, PoolId(1));
        assert_eq!(liquidity.mint_amount, Decimal::from(2_000_000));
        assert_eq!(liquidity.total_weight / liquidity.mint_weight, Decimal::from(2));
    }

    #[test]
    fn pools_without_mint_asset_have_no_liquidity() {
        let json = r#"{"pool":{"id":"7","pool_liquidity":[]}}"#;
        let resp: PoolResponse = serde_json::from_str(json).unwrap();
        assert!(pool_liquidity(resp.pool, "uosmo").unwrap().is_none());
    }

    #[test]
    fn decodes_delivered_tx() {
        let json = r#"{"tx_response":{"txhash":"ABC","code":5,"raw_log":"insufficient funds","height":"1"}}"#;
        let resp: TxResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.tx_response.code, 5);
        assert_eq!(resp.tx_response.raw_log, "insufficient funds");
    }
}
