//! Period locks and the per-duration view of them used by the lockups table.

use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::coin::CoinAmount;
use crate::coin::Currency;
use crate::coin::RawCoin;
use crate::duration::BondingDuration;

/// Identifies a single lock on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LockId(pub u64);

impl fmt::Display for LockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One lock held by an account, as reported by the lockup module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodLock {
    pub id: LockId,
    pub owner: String,
    pub duration: BondingDuration,
    /// Set once unbonding has begun. The chain reports the zero timestamp otherwise.
    pub end_time: Option<DateTime<Utc>>,
    pub coins: Vec<RawCoin>,
}

impl PeriodLock {
    pub fn is_unbonding(&self) -> bool {
        self.end_time
            .map(|end| end.timestamp_millis() > 0)
            .unwrap_or(false)
    }
}

/// Everything an account has locked under one (currency, duration) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedCoinEntry {
    pub amount: CoinAmount,
    /// In the order the chain returned the locks. May be empty.
    pub lock_ids: Vec<LockId>,
}

impl LockedCoinEntry {
    pub fn empty(currency: Currency) -> Self {
        Self {
            amount: CoinAmount::zero(currency),
            lock_ids: Vec::new(),
        }
    }
}

/// Sums `currency` over the locks of exactly `duration` that are not yet unbonding.
pub fn locked_coin_with_duration(
    locks: &[PeriodLock],
    currency: &Currency,
    duration: BondingDuration,
) -> LockedCoinEntry {
    let mut entry = LockedCoinEntry::empty(currency.clone());

    for lock in locks
        .iter()
        .filter(|lock| lock.duration == duration && !lock.is_unbonding())
    {
        let mut matched = false;
        for coin in lock
            .coins
            .iter()
            .filter(|coin| coin.denom == currency.coin_minimal_denom)
        {
            match CoinAmount::from_minimal_str(currency.clone(), &coin.amount) {
                Ok(amount) => match entry.amount.checked_add(&amount) {
                    Some(sum) => {
                        entry.amount = sum;
                        matched = true;
                    }
                    None => dioxus_logger::tracing::warn!("lock {} overflows the locked total", lock.id),
                },
                Err(e) => dioxus_logger::tracing::warn!("lock {}: {}", lock.id, e),
            }
        }
        if matched {
            entry.lock_ids.push(lock.id);
        }
    }

    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::PoolId;

    fn lock(id: u64, days: u64, denom: &str, amount: &str, end_time: Option<&str>) -> PeriodLock {
        PeriodLock {
            id: LockId(id),
            owner: "osmo1owner".to_string(),
            duration: BondingDuration::from_days(days),
            end_time: end_time.map(|t| t.parse().unwrap()),
            coins: vec![RawCoin {
                denom: denom.to_string(),
                amount: amount.to_string(),
            }],
        }
    }

    #[test]
    fn sums_matching_locks_in_chain_order() {
        let share = PoolId(1).share_currency();
        let locks = vec![
            lock(9, 14, "gamm/pool/1", "300", None),
            lock(3, 14, "gamm/pool/1", "200", Some("0001-01-01T00:00:00Z")),
            lock(5, 7, "gamm/pool/1", "1000", None),
            lock(7, 14, "gamm/pool/2", "1000", None),
        ];

        let entry = locked_coin_with_duration(&locks, &share, BondingDuration::from_days(14));
        assert_eq!(entry.amount.as_minimal_units(), 500);
        assert_eq!(entry.lock_ids, vec![LockId(9), LockId(3)]);
    }

    #[test]
    fn skips_locks_that_are_already_unbonding() {
        let share = PoolId(1).share_currency();
        let locks = vec![
            lock(1, 1, "gamm/pool/1", "100", Some("2021-07-01T12:00:00Z")),
            lock(2, 1, "gamm/pool/1", "50", None),
        ];

        let entry = locked_coin_with_duration(&locks, &share, BondingDuration::from_days(1));
        assert_eq!(entry.amount.as_minimal_units(), 50);
        assert_eq!(entry.lock_ids, vec![LockId(2)]);
    }

    #[test]
    fn no_matching_locks_gives_zero_entry() {
        let share = PoolId(1).share_currency();
        let entry = locked_coin_with_duration(&[], &share, BondingDuration::from_days(1));
        assert!(entry.amount.is_zero());
        assert!(entry.lock_ids.is_empty());
        assert_eq!(entry, LockedCoinEntry::empty(share));
    }
}
