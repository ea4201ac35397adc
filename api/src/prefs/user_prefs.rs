use crate::fiat_currency::FiatCurrency;
use serde::Deserialize;
use serde::Serialize;
use std::env;
use std::str::FromStr;

/// Represents all user prefs. Intended for saving to a file, editing in a settings dialog, etc.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct UserPrefs {
    fiat_currency: FiatCurrency,
}

impl UserPrefs {
    /// The currency APY is priced in.
    pub fn fiat_currency(&self) -> FiatCurrency {
        self.fiat_currency
    }

    /// Reads `FIAT_CURRENCY` ("USD", "EUR", ...). Unknown values fall back to USD.
    pub fn from_env() -> Self {
        let fiat_currency = env::var("FIAT_CURRENCY")
            .ok()
            .and_then(|s| FiatCurrency::from_str(s.trim()).ok())
            .unwrap_or_default();

        Self { fiat_currency }
    }
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self::from_env()
    }
}
