//! Currencies and exact on-chain coin amounts.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// An error that can occur when parsing an on-chain coin amount.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCoinError {
    /// The amount is not an unsigned integer count of minimal units.
    #[error("invalid coin amount: {0}")]
    InvalidAmount(String),
}

/// Describes how a denom is displayed: its human denom and its decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    /// Display denom, e.g. "OSMO" or "GAMM/1".
    pub coin_denom: String,
    /// On-chain denom, e.g. "uosmo" or "gamm/pool/1".
    pub coin_minimal_denom: String,
    pub coin_decimals: u8,
}

impl Currency {
    pub fn new(coin_denom: &str, coin_minimal_denom: &str, coin_decimals: u8) -> Self {
        Self {
            coin_denom: coin_denom.to_string(),
            coin_minimal_denom: coin_minimal_denom.to_string(),
            coin_decimals,
        }
    }

    /// The chain's native staking and mint currency.
    pub fn osmo() -> Self {
        Self::new("OSMO", "uosmo", 6)
    }
}

/// A coin as it appears in chain query responses: a denom and an integer amount string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCoin {
    pub denom: String,
    pub amount: String,
}

/// An exact amount of a currency.
///
/// The amount is held as an integer number of minimal units (e.g. `uosmo`) so
/// nothing is lost to floating point. Formatting happens through [`CoinPretty`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinAmount {
    currency: Currency,
    minimal_units: u128,
}

impl CoinAmount {
    pub fn new(currency: Currency, minimal_units: u128) -> Self {
        Self {
            currency,
            minimal_units,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(currency, 0)
    }

    /// Parses a minimal-unit amount string such as `"5123456"`.
    pub fn from_minimal_str(currency: Currency, amount: &str) -> Result<Self, ParseCoinError> {
        let minimal_units = amount
            .trim()
            .parse::<u128>()
            .map_err(|_| ParseCoinError::InvalidAmount(amount.to_string()))?;
        Ok(Self::new(currency, minimal_units))
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn as_minimal_units(&self) -> u128 {
        self.minimal_units
    }

    pub fn is_zero(&self) -> bool {
        self.minimal_units == 0
    }

    /// Starts a display format for this amount. By default all of the
    /// currency's decimals are shown and nothing is trimmed.
    pub fn pretty(&self) -> CoinPretty<'_> {
        CoinPretty {
            amount: self,
            max_decimals: self.currency.coin_decimals,
            trim: false,
        }
    }
}

impl CoinAmount {
    /// Returns `None` on a currency mismatch or overflow.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.currency != other.currency {
            return None;
        }
        self.minimal_units
            .checked_add(other.minimal_units)
            .map(|minimal_units| Self::new(self.currency.clone(), minimal_units))
    }
}

/// A display format over a [`CoinAmount`].
///
/// `max_decimals` cuts the fraction without rounding; `trim` then strips
/// trailing fractional zeros. The integer part is grouped with commas.
#[derive(Debug, Clone, Copy)]
pub struct CoinPretty<'a> {
    amount: &'a CoinAmount,
    max_decimals: u8,
    trim: bool,
}

impl CoinPretty<'_> {
    pub fn max_decimals(mut self, max_decimals: u8) -> Self {
        self.max_decimals = max_decimals;
        self
    }

    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// The formatted number without the denom, e.g. "1,234.5".
    pub fn number_string(&self) -> String {
        let decimals = self.amount.currency.coin_decimals as u32;
        let divisor = 10_u128.pow(decimals);
        let whole = self.amount.minimal_units / divisor;
        let fraction = self.amount.minimal_units % divisor;

        let shown = self.max_decimals.min(self.amount.currency.coin_decimals) as usize;
        let mut fraction_str = if decimals == 0 {
            String::new()
        } else {
            format!("{:0width$}", fraction, width = decimals as usize)
        };
        fraction_str.truncate(shown);
        if self.trim {
            let trimmed_len = fraction_str.trim_end_matches('0').len();
            fraction_str.truncate(trimmed_len);
        }

        let whole_str = group_thousands(whole);
        if fraction_str.is_empty() {
            whole_str
        } else {
            format!("{}.{}", whole_str, fraction_str)
        }
    }
}

/// Formats as number and denom, e.g. "5.123456 GAMM/1".
impl fmt::Display for CoinPretty<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number_string(), self.amount.currency.coin_denom)
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
