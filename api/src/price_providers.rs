//! Defines traits and implementations for external price data providers.

use crate::fiat_currency::FiatCurrency;
use crate::price_map::PriceMap;
use crate::ApiError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// A trait for any service that can provide fiat prices for OSMO.
#[allow(async_fn_in_trait)]
pub trait PriceProvider {
    /// Fetches the latest price map.
    async fn get_prices(&self) -> Result<PriceMap, ApiError>;
}

/// Turns a `{"usd": 0.51, ...}` quote object into a price map, ignoring
/// currencies we do not support.
pub fn price_map_from_quotes(quotes: &HashMap<String, f64>) -> PriceMap {
    FiatCurrency::iter()
        .filter_map(|currency| {
            let quote = quotes.get(&currency.quote_key())?;
            Decimal::from_f64(*quote).map(|price| (currency, price))
        })
        .collect()
}

/// Provides price data from the public CoinGecko API.
pub mod coin_gecko {
    use super::*;

    /// The structure of the JSON response from CoinGecko's simple price API.
    #[derive(Deserialize, Debug)]
    pub(crate) struct CoinGeckoResponse {
        pub(crate) osmosis: HashMap<String, f64>,
    }

    /// An implementation of the `PriceProvider` trait for CoinGecko.
    pub struct CoinGecko;

    impl CoinGecko {
        fn url() -> String {
            let vs_currencies = FiatCurrency::iter()
                .map(|c| c.quote_key())
                .collect::<Vec<_>>()
                .join(",");
            format!(
                "https://api.coingecko.com/api/v3/simple/price?ids=osmosis&vs_currencies={}",
                vs_currencies
            )
        }
    }

    impl PriceProvider for CoinGecko {
        async fn get_prices(&self) -> Result<PriceMap, ApiError> {
            let resp = reqwest::Client::new()
                .get(Self::url())
                .send()
                .await?
                .error_for_status()?
                .json::<CoinGeckoResponse>()
                .await?;

            Ok(price_map_from_quotes(&resp.osmosis))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::coin_gecko::CoinGeckoResponse;
    use super::*;
    use std::str::FromStr;

    #[test]
    fn decodes_coin_gecko_quotes() {
        let json = r#"{"osmosis":{"usd":0.51,"eur":0.47,"jpy":77.2,"chf":0.45}}"#;
        let resp: CoinGeckoResponse = serde_json::from_str(json).unwrap();
        let prices = price_map_from_quotes(&resp.osmosis);

        assert_eq!(prices.get(FiatCurrency::USD), Some(Decimal::from_str("0.51").unwrap()));
        assert_eq!(prices.get(FiatCurrency::JPY), Some(Decimal::from_str("77.2").unwrap()));
        assert!(!prices.contains(FiatCurrency::KRW));
    }
}
