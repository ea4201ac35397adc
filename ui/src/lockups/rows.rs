use api::duration::BondingDuration;
use api::fiat_currency::FiatCurrency;
use api::incentives::format_apy;
use api::incentives::ApyCalculator;
use api::lock::LockedCoinEntry;
use api::pool::PoolId;
use api::price_map::PriceMap;
use api::queries::QueryCache;

const AMOUNT_MAX_DECIMALS: u8 = 6;

/// What one table row shows for a bonding duration.
#[derive(Debug, Clone, PartialEq)]
pub struct LockupRowModel {
    pub duration: BondingDuration,
    pub duration_label: String,
    pub apy: String,
    pub lockup: LockedCoinEntry,
}

impl LockupRowModel {
    pub fn amount_display(&self) -> String {
        self.lockup
            .amount
            .pretty()
            .max_decimals(AMOUNT_MAX_DECIMALS)
            .trim(true)
            .to_string()
    }
}

/// One row per lockable duration, in the order the chain lists them.
pub fn lockup_rows<'a, Q, A>(
    pool_id: PoolId,
    owner: &'a str,
    queries: &'a Q,
    apy_calculator: &'a A,
    prices: &'a PriceMap,
    fiat: FiatCurrency,
) -> impl Iterator<Item = LockupRowModel> + 'a
where
    Q: QueryCache + ?Sized,
    A: ApyCalculator + ?Sized,
{
    let share_currency = queries.pool_share_currency(pool_id);

    queries
        .lockable_durations()
        .iter()
        .map(move |&duration| LockupRowModel {
            duration,
            duration_label: duration.humanize(),
            apy: format_apy(apy_calculator.compute_apy(pool_id, duration, prices, fiat)),
            lockup: queries.locked_coin_with_duration(owner, &share_currency, duration),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::coin::CoinAmount;
    use api::coin::Currency;
    use api::lock::LockId;
    use rust_decimal::Decimal;

    struct FakeQueries {
        durations: Vec<BondingDuration>,
        locked: Vec<(BondingDuration, u128, Vec<LockId>)>,
    }

    impl QueryCache for FakeQueries {
        fn lockable_durations(&self) -> &[BondingDuration] {
            &self.durations
        }

        fn locked_coin_with_duration(
            &self,
            _owner: &str,
            currency: &Currency,
            duration: BondingDuration,
        ) -> LockedCoinEntry {
            self.locked
                .iter()
                .find(|(d, _, _)| *d == duration)
                .map(|(_, amount, ids)| LockedCoinEntry {
                    amount: CoinAmount::new(currency.clone(), *amount),
                    lock_ids: ids.clone(),
                })
                .unwrap_or_else(|| LockedCoinEntry::empty(currency.clone()))
        }
    }

    /// Pays one percent per bonded day.
    struct PercentPerDay;

    impl ApyCalculator for PercentPerDay {
        fn compute_apy(
            &self,
            _pool_id: PoolId,
            duration: BondingDuration,
            _prices: &PriceMap,
            _fiat: FiatCurrency,
        ) -> Decimal {
            Decimal::from(duration.as_secs() / 86_400)
        }
    }

    fn prices() -> PriceMap {
        [(FiatCurrency::USD, Decimal::ONE)].into_iter().collect()
    }

    #[test]
    fn one_row_per_duration_in_chain_order() {
        let durations = vec![
            BondingDuration::from_days(1),
            BondingDuration::from_days(14),
            BondingDuration::from_days(7),
        ];
        let queries = FakeQueries {
            durations: durations.clone(),
            locked: vec![],
        };
        let prices = prices();

        let rows: Vec<_> =
            lockup_rows(PoolId(1), "osmo1owner", &queries, &PercentPerDay, &prices, FiatCurrency::USD)
                .collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().map(|r| r.duration).collect::<Vec<_>>(), durations);
        assert_eq!(rows[0].duration_label, "a day");
        assert_eq!(rows[1].duration_label, "14 days");
        assert_eq!(rows[1].apy, "14.00%");
        assert!(rows.iter().all(|r| r.lockup.amount.is_zero()));
    }

    #[test]
    fn no_durations_means_no_rows() {
        let queries = FakeQueries {
            durations: vec![],
            locked: vec![],
        };
        let prices = prices();

        let rows = lockup_rows(PoolId(1), "", &queries, &PercentPerDay, &prices, FiatCurrency::USD);
        assert_eq!(rows.count(), 0);
    }

    #[test]
    fn row_carries_pool_share_lockup() {
        let week = BondingDuration::from_days(7);
        let queries = FakeQueries {
            durations: vec![week],
            locked: vec![(week, 5_123_456_789_000_000_000, vec![LockId(3), LockId(9)])],
        };
        let prices = prices();

        let row = lockup_rows(PoolId(1), "osmo1owner", &queries, &PercentPerDay, &prices, FiatCurrency::USD)
            .next()
            .unwrap();

        assert_eq!(row.lockup.amount.currency(), &PoolId(1).share_currency());
        assert_eq!(row.lockup.lock_ids, vec![LockId(3), LockId(9)]);
        assert_eq!(row.amount_display(), "5.123456 GAMM/1");
    }
}
