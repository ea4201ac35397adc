//! Provides a specialized map for storing OSMO prices against fiat currencies.

use crate::fiat_currency::FiatCurrency;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

/// The price of one OSMO in each fiat currency we have a quote for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceMap(HashMap<FiatCurrency, Decimal>);

impl PriceMap {
    /// Retrieves the price for a specific currency.
    ///
    /// Returns `None` if the price for the requested currency is not available.
    pub fn get(&self, currency: FiatCurrency) -> Option<Decimal> {
        self.0.get(&currency).copied()
    }

    pub fn contains(&self, currency: FiatCurrency) -> bool {
        self.0.contains_key(&currency)
    }
}

impl FromIterator<(FiatCurrency, Decimal)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (FiatCurrency, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
