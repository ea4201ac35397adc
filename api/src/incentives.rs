//! Incentive emission data and the APY it implies for each bonding duration.

use itertools::Itertools;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::Deserialize;
use serde::Serialize;

use crate::coin::Currency;
use crate::duration::BondingDuration;
use crate::fiat_currency::FiatCurrency;
use crate::pool::PoolId;
use crate::price_map::PriceMap;

const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Computes the annualized yield of bonding a pool's shares for a duration.
pub trait ApyCalculator {
    /// Returns the APY as a percentage, e.g. `12.5` for 12.5%.
    ///
    /// `prices` must hold a price for `fiat`; callers check that before asking.
    fn compute_apy(
        &self,
        pool_id: PoolId,
        duration: BondingDuration,
        prices: &PriceMap,
        fiat: FiatCurrency,
    ) -> Decimal;
}

/// Formats an APY percentage with two decimals, e.g. "12.35%".
pub fn format_apy(apy: Decimal) -> String {
    let rounded = apy.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", rounded)
}

/// A gauge paying incentives to one pool for one lockable duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentivizedGauge {
    pub pool_id: PoolId,
    pub lockable_duration: BondingDuration,
    pub gauge_id: u64,
}

/// A gauge's share of the pool incentives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrRecord {
    pub gauge_id: u64,
    pub weight: Decimal,
}

/// The mint-denom leg of a weighted pool, enough to value the whole pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolLiquidity {
    pub pool_id: PoolId,
    /// Mint denom held by the pool, in minimal units.
    pub mint_amount: Decimal,
    pub mint_weight: Decimal,
    pub total_weight: Decimal,
}

/// Everything needed to price incentives, taken from the chain at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveSnapshot {
    pub mint_currency: Currency,
    /// Newly minted tokens per epoch, in minimal units.
    pub epoch_provisions: Decimal,
    pub epoch_duration: BondingDuration,
    /// Fraction of each epoch's provisions that goes to pool incentives.
    pub pool_incentives_proportion: Decimal,
    pub distr_total_weight: Decimal,
    pub distr_records: Vec<DistrRecord>,
    pub incentivized_pools: Vec<IncentivizedGauge>,
    pub lockable_durations: Vec<BondingDuration>,
    pub pools: Vec<PoolLiquidity>,
}

impl IncentiveSnapshot {
    /// Pool value in fiat, extrapolated from its mint-denom leg and weights.
    pub fn pool_tvl(&self, pool_id: PoolId, mint_price: Decimal) -> Option<Decimal> {
        let pool = self.pools.iter().find(|p| p.pool_id == pool_id)?;
        let scale = Decimal::from(10_u64.pow(self.mint_currency.coin_decimals as u32));

        let tvl = pool
            .mint_amount
            .checked_div(scale)?
            .checked_mul(mint_price)?
            .checked_mul(pool.total_weight)?
            .checked_div(pool.mint_weight)?;
        (tvl > Decimal::ZERO).then_some(tvl)
    }

    /// APR paid by the single gauge of (pool, duration), if it exists.
    fn gauge_apr(
        &self,
        pool_id: PoolId,
        duration: BondingDuration,
        mint_price: Decimal,
        pool_tvl: Decimal,
    ) -> Option<Decimal> {
        let gauge = self
            .incentivized_pools
            .iter()
            .find(|g| g.pool_id == pool_id && g.lockable_duration == duration)?;
        let weight = self
            .distr_records
            .iter()
            .find(|r| r.gauge_id == gauge.gauge_id)?
            .weight;
        if self.distr_total_weight <= Decimal::ZERO || self.epoch_duration.as_secs() == 0 {
            return None;
        }

        let scale = Decimal::from(10_u64.pow(self.mint_currency.coin_decimals as u32));
        let epochs_per_year =
            Decimal::from(SECONDS_PER_YEAR).checked_div(Decimal::from(self.epoch_duration.as_secs()))?;

        let year_provision = self
            .epoch_provisions
            .checked_div(scale)?
            .checked_mul(epochs_per_year)?;
        let to_gauge = year_provision
            .checked_mul(self.pool_incentives_proportion)?
            .checked_mul(weight)?
            .checked_div(self.distr_total_weight)?;

        to_gauge
            .checked_mul(mint_price)?
            .checked_div(pool_tvl)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}

impl ApyCalculator for IncentiveSnapshot {
    /// A lock also earns from every gauge of a shorter duration, so the
    /// per-gauge APRs are summed in ascending duration order up to `duration`.
    fn compute_apy(
        &self,
        pool_id: PoolId,
        duration: BondingDuration,
        prices: &PriceMap,
        fiat: FiatCurrency,
    ) -> Decimal {
        let Some(mint_price) = prices.get(fiat) else {
            return Decimal::ZERO;
        };
        let Some(pool_tvl) = self.pool_tvl(pool_id, mint_price) else {
            return Decimal::ZERO;
        };

        let mut apy = Decimal::ZERO;
        for lockable in self.lockable_durations.iter().sorted() {
            if *lockable > duration {
                break;
            }
            if let Some(apr) = self.gauge_apr(pool_id, *lockable, mint_price, pool_tvl) {
                apy += apr;
            }
        }
        apy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn snapshot() -> IncentiveSnapshot {
        let day = BondingDuration::from_days(1);
        let week = BondingDuration::from_days(7);
        let fortnight = BondingDuration::from_days(14);
        IncentiveSnapshot {
            mint_currency: Currency::osmo(),
            // 1,000,000 OSMO per daily epoch
            epoch_provisions: dec("1000000000000"),
            epoch_duration: day,
            pool_incentives_proportion: dec("0.5"),
            distr_total_weight: dec("1000"),
            distr_records: vec![
                DistrRecord { gauge_id: 1, weight: dec("10") },
                DistrRecord { gauge_id: 2, weight: dec("20") },
                DistrRecord { gauge_id: 3, weight: dec("70") },
            ],
            incentivized_pools: vec![
                IncentivizedGauge { pool_id: PoolId(1), lockable_duration: day, gauge_id: 1 },
                IncentivizedGauge { pool_id: PoolId(1), lockable_duration: week, gauge_id: 2 },
                IncentivizedGauge { pool_id: PoolId(1), lockable_duration: fortnight, gauge_id: 3 },
            ],
            // chain order is not guaranteed to be ascending
            lockable_durations: vec![fortnight, day, week],
            pools: vec![PoolLiquidity {
                pool_id: PoolId(1),
                mint_amount: dec("1000000000000"),
                mint_weight: dec("1"),
                total_weight: dec("2"),
            }],
        }
    }

    fn usd_prices(price: &str) -> PriceMap {
        [(FiatCurrency::USD, dec(price))].into_iter().collect()
    }

    #[test]
    fn values_pool_through_its_mint_leg() {
        assert_eq!(snapshot().pool_tvl(PoolId(1), dec("2")), Some(dec("4000000")));
        assert_eq!(snapshot().pool_tvl(PoolId(2), dec("2")), None);
    }

    #[test]
    fn longer_durations_accumulate_shorter_gauges() {
        let snapshot = snapshot();
        let prices = usd_prices("2");
        let apy = |days| {
            snapshot.compute_apy(PoolId(1), BondingDuration::from_days(days), &prices, FiatCurrency::USD)
        };

        assert_eq!(apy(1), dec("91.25"));
        assert_eq!(apy(7), dec("273.75"));
        assert_eq!(apy(14), dec("912.5"));
        assert_eq!(format_apy(apy(14)), "912.50%");
    }

    #[test]
    fn unlisted_duration_earns_only_shorter_gauges() {
        let snapshot = snapshot();
        let prices = usd_prices("2");
        let three_days = BondingDuration::from_days(3);

        assert_eq!(
            snapshot.compute_apy(PoolId(1), three_days, &prices, FiatCurrency::USD),
            dec("91.25")
        );
    }

    #[test]
    fn missing_inputs_give_zero() {
        let snapshot = snapshot();
        let day = BondingDuration::from_days(1);

        assert_eq!(
            snapshot.compute_apy(PoolId(1), day, &usd_prices("2"), FiatCurrency::EUR),
            Decimal::ZERO
        );
        assert_eq!(
            snapshot.compute_apy(PoolId(9), day, &usd_prices("2"), FiatCurrency::USD),
            Decimal::ZERO
        );
    }

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(format_apy(dec("12.345")), "12.35%");
        assert_eq!(format_apy(dec("0")), "0.00%");
        assert_eq!(format_apy(dec("7.1")), "7.10%");
    }
}
