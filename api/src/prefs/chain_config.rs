use serde::Deserialize;
use serde::Serialize;
use std::env;

use crate::tx::TxExplorer;

/// Where the app finds the chain, its explorer and the signing service.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: String,
    /// Base URL of the chain's LCD (REST) endpoint.
    pub lcd_url: String,
    /// Explorer link template containing `{txHash}`.
    pub explorer_url_to_tx: String,
    /// Base URL of the local signing service that holds the user's key.
    pub signer_url: String,
}

impl ChainConfig {
    const DEFAULT_CHAIN_ID: &'static str = "osmosis-1";
    const DEFAULT_LCD_URL: &'static str = "https://lcd.osmosis.zone";
    const DEFAULT_EXPLORER_URL_TO_TX: &'static str = "https://www.mintscan.io/osmosis/txs/{txHash}";
    const DEFAULT_SIGNER_URL: &'static str = "http://127.0.0.1:9797";

    /// Creates a ChainConfig from environment variables, falling back to the
    /// Osmosis mainnet defaults.
    ///
    /// # Environment Variables
    /// - `CHAIN_ID`
    /// - `LCD_URL`
    /// - `EXPLORER_TX_URL`: must contain `{txHash}`.
    /// - `SIGNER_URL`
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub(crate) fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            var(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            chain_id: get("CHAIN_ID", Self::DEFAULT_CHAIN_ID),
            lcd_url: get("LCD_URL", Self::DEFAULT_LCD_URL)
                .trim_end_matches('/')
                .to_string(),
            explorer_url_to_tx: get("EXPLORER_TX_URL", Self::DEFAULT_EXPLORER_URL_TO_TX),
            signer_url: get("SIGNER_URL", Self::DEFAULT_SIGNER_URL)
                .trim_end_matches('/')
                .to_string(),
        }
    }

    pub fn explorer(&self) -> TxExplorer {
        TxExplorer::new(self.explorer_url_to_tx.clone())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
