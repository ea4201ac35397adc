//! Defines the fiat currencies APY and prices can be quoted in.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::Deserialize;
use serde::Serialize;

/// A fiat currency that the price provider quotes OSMO in.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize, Default, strum::EnumIter, strum::EnumString, strum::IntoStaticStr)]
#[strum(ascii_case_insensitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum FiatCurrency {
    #[default]
    USD, // United States Dollar
    EUR, // Euro
    GBP, // Great British Pound
    JPY, // Japanese Yen
    KRW, // South Korean Won
}

impl FiatCurrency {
    /// Returns the graphical symbol for the currency (e.g., '$').
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::JPY => "¥",
            Self::KRW => "₩",
        }
    }

    /// Returns the ISO 4217 code, e.g. "USD".
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// Formats a price with the currency symbol and two decimals, e.g. "$1.25".
    pub fn format_price(&self, price: Decimal) -> String {
        let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{:.2}", self.symbol(), rounded)
    }

    /// The key price APIs use for this currency, e.g. "usd".
    pub fn quote_key(&self) -> String {
        self.code().to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(FiatCurrency::from_str("eur"), Ok(FiatCurrency::EUR));
        assert_eq!(FiatCurrency::from_str("KRW"), Ok(FiatCurrency::KRW));
        assert!(FiatCurrency::from_str("xyz").is_err());
    }

    #[test]
    fn quote_keys_are_lowercase_codes() {
        for currency in FiatCurrency::iter() {
            assert_eq!(currency.quote_key(), currency.code().to_lowercase());
        }
    }

    #[test]
    fn prices_show_symbol_and_cents() {
        assert_eq!(
            FiatCurrency::USD.format_price(Decimal::from_str("0.8765").unwrap()),
            "$0.88"
        );
        assert_eq!(FiatCurrency::KRW.format_price(Decimal::from(1200)), "₩1200.00");
    }
}
