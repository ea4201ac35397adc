use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::coin::Currency;

/// Decimal places of every pool share token.
pub const POOL_SHARE_DECIMALS: u8 = 18;

const SHARE_DENOM_PREFIX: &str = "gamm/pool/";

/// Identifies a liquidity pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PoolId(pub u64);

impl PoolId {
    /// The LP share token minted by this pool, e.g. `gamm/pool/1` shown as "GAMM/1".
    pub fn share_currency(&self) -> Currency {
        Currency::new(
            &format!("GAMM/{}", self.0),
            &format!("{}{}", SHARE_DENOM_PREFIX, self.0),
            POOL_SHARE_DECIMALS,
        )
    }

    /// The pool behind a share denom such as `gamm/pool/1`.
    pub fn from_share_denom(denom: &str) -> Option<Self> {
        denom
            .strip_prefix(SHARE_DENOM_PREFIX)?
            .parse()
            .ok()
            .map(Self)
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_currency_follows_gamm_naming() {
        let currency = PoolId(678).share_currency();
        assert_eq!(currency.coin_denom, "GAMM/678");
        assert_eq!(currency.coin_minimal_denom, "gamm/pool/678");
        assert_eq!(currency.coin_decimals, 18);
    }

    #[test]
    fn only_gamm_denoms_name_a_pool() {
        assert_eq!(PoolId::from_share_denom("gamm/pool/678"), Some(PoolId(678)));
        assert_eq!(PoolId::from_share_denom("uosmo"), None);
        assert_eq!(PoolId::from_share_denom("gamm/pool/x"), None);
        assert_eq!(
            PoolId::from_share_denom(&PoolId(5).share_currency().coin_minimal_denom),
            Some(PoolId(5))
        );
    }
}
