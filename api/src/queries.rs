//! Read-side contracts the lockups table pulls from, and the snapshot that backs them.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::coin::CoinAmount;
use crate::coin::Currency;
use crate::duration::BondingDuration;
use crate::lock::locked_coin_with_duration;
use crate::lock::LockedCoinEntry;
use crate::lock::PeriodLock;
use crate::pool::PoolId;

/// Synchronous reads against whatever chain state has already been fetched.
///
/// Implementations never fetch on read. Keeping the cache fresh is up to
/// whoever owns it.
pub trait QueryCache {
    /// The bonding durations offered by the chain, in the chain's order.
    fn lockable_durations(&self) -> &[BondingDuration];

    fn locked_coin_with_duration(
        &self,
        owner: &str,
        currency: &Currency,
        duration: BondingDuration,
    ) -> LockedCoinEntry;

    fn pool_share_currency(&self, pool_id: PoolId) -> Currency {
        pool_id.share_currency()
    }
}

/// Lockable durations plus one account's locks, fetched together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockupQueries {
    pub lockable_durations: Vec<BondingDuration>,
    pub owner: String,
    pub locks: Vec<PeriodLock>,
}

impl LockupQueries {
    /// The owner's pool shares across all locks, bonded or unbonding, by ascending pool id.
    ///
    /// Coins that are not pool shares are skipped.
    pub fn pool_shares(&self) -> Vec<(PoolId, CoinAmount)> {
        let mut shares: BTreeMap<PoolId, CoinAmount> = BTreeMap::new();

        for (lock, coin) in self
            .locks
            .iter()
            .flat_map(|lock| lock.coins.iter().map(move |coin| (lock, coin)))
        {
            let Some(pool_id) = PoolId::from_share_denom(&coin.denom) else {
                continue;
            };
            let amount = match CoinAmount::from_minimal_str(pool_id.share_currency(), &coin.amount) {
                Ok(amount) => amount,
                Err(e) => {
                    dioxus_logger::tracing::warn!("lock {}: {}", lock.id, e);
                    continue;
                }
            };

            let total = shares
                .entry(pool_id)
                .or_insert_with(|| CoinAmount::zero(pool_id.share_currency()));
            match total.checked_add(&amount) {
                Some(sum) => *total = sum,
                None => dioxus_logger::tracing::warn!("lock {} overflows pool {} shares", lock.id, pool_id),
            }
        }

        shares.into_iter().collect()
    }
}

impl QueryCache for LockupQueries {
    fn lockable_durations(&self) -> &[BondingDuration] {
        &self.lockable_durations
    }

    fn locked_coin_with_duration(
        &self,
        owner: &str,
        currency: &Currency,
        duration: BondingDuration,
    ) -> LockedCoinEntry {
        if owner.is_empty() || owner != self.owner {
            return LockedCoinEntry::empty(currency.clone());
        }
        locked_coin_with_duration(&self.locks, currency, duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::RawCoin;
    use crate::lock::LockId;

    #[test]
    fn other_owners_see_nothing_locked() {
        let queries = LockupQueries {
            lockable_durations: vec![BondingDuration::from_days(1)],
            owner: "osmo1alice".to_string(),
            locks: vec![PeriodLock {
                id: LockId(1),
                owner: "osmo1alice".to_string(),
                duration: BondingDuration::from_days(1),
                end_time: None,
                coins: vec![RawCoin {
                    denom: "gamm/pool/1".to_string(),
                    amount: "10".to_string(),
                }],
            }],
        };
        let share = queries.pool_share_currency(PoolId(1));
        let day = BondingDuration::from_days(1);

        let alice = queries.locked_coin_with_duration("osmo1alice", &share, day);
        assert_eq!(alice.amount.as_minimal_units(), 10);

        let bob = queries.locked_coin_with_duration("osmo1bob", &share, day);
        assert!(bob.amount.is_zero());
        assert!(queries.locked_coin_with_duration("", &share, day).lock_ids.is_empty());
    }

    fn lock(id: u64, days: u64, coins: &[(&str, &str)]) -> PeriodLock {
        PeriodLock {
            id: LockId(id),
            owner: "osmo1alice".to_string(),
            duration: BondingDuration::from_days(days),
            end_time: None,
            coins: coins
                .iter()
                .map(|(denom, amount)| RawCoin {
                    denom: denom.to_string(),
                    amount: amount.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn pool_shares_sum_every_lock_per_pool() {
        let queries = LockupQueries {
            lockable_durations: vec![],
            owner: "osmo1alice".to_string(),
            locks: vec![
                lock(1, 14, &[("gamm/pool/678", "5")]),
                lock(2, 1, &[("gamm/pool/1", "7"), ("uosmo", "100")]),
                lock(3, 7, &[("gamm/pool/678", "10")]),
                lock(4, 7, &[("gamm/pool/9", "not a number")]),
            ],
        };

        let shares: Vec<(PoolId, u128)> = queries
            .pool_shares()
            .into_iter()
            .map(|(pool_id, amount)| (pool_id, amount.as_minimal_units()))
            .collect();

        assert_eq!(shares, vec![(PoolId(1), 7), (PoolId(678), 15)]);
    }
}
